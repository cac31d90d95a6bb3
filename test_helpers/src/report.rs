//! Captures render-prop diagnostics instead of logging them.

use std::sync::Arc;

use parking_lot::Mutex;
use transmark::{DiagnosticReporter, TransDiagnostic};

/// Collects every diagnostic passed to its reporter.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    seen: Arc<Mutex<Vec<TransDiagnostic>>>,
}

impl RecordingReporter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reporter feeding this recorder.
    #[must_use]
    pub fn reporter(&self) -> DiagnosticReporter {
        let seen = Arc::clone(&self.seen);
        Arc::new(move |diagnostic: &TransDiagnostic| seen.lock().push(diagnostic.clone()))
    }

    /// Drains the recorded diagnostics.
    #[must_use]
    pub fn take(&self) -> Vec<TransDiagnostic> {
        std::mem::take(&mut *self.seen.lock())
    }

    /// Number of diagnostics recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }
}
