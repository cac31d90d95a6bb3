//! Choosing how a finished translation is presented.

use std::fmt;
use std::sync::Arc;

use crate::bind::OutputNode;

/// Arguments handed to render callbacks and provider default components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransRenderProps<'a, C> {
    /// Message id.
    pub id: &'a str,
    /// Fallback message supplied with the call.
    pub message: Option<&'a str>,
    /// Rendered translation.
    pub translation: Vec<OutputNode<C>>,
}

impl<C> TransRenderProps<'_, C> {
    /// The translation, for callbacks that treat it as child content.
    #[must_use]
    pub fn children(&self) -> &[OutputNode<C>] {
        &self.translation
    }
}

/// Callback turning render props into output.
pub type RenderCallback<C> =
    Arc<dyn Fn(&TransRenderProps<'_, C>) -> Vec<OutputNode<C>> + Send + Sync>;

/// State of an optional render prop.
#[derive(Clone, Default)]
pub enum RenderSlot<T> {
    /// Not supplied.
    #[default]
    Unset,
    /// Explicitly disabled; suppresses the provider default.
    Null,
    /// Supplied with a value of the wrong shape, described for diagnostics.
    Invalid(String),
    /// Supplied and usable.
    Set(T),
}

impl<T> RenderSlot<T> {
    /// Converts a supplied value, keeping the slot state.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RenderSlot<U> {
        match self {
            Self::Unset => RenderSlot::Unset,
            Self::Null => RenderSlot::Null,
            Self::Invalid(provided) => RenderSlot::Invalid(provided),
            Self::Set(value) => RenderSlot::Set(f(value)),
        }
    }

    const fn is_supplied(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl<T> fmt::Debug for RenderSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Null => f.write_str("Null"),
            Self::Invalid(value) => f.debug_tuple("Invalid").field(value).finish(),
            Self::Set(_) => f.write_str("Set(..)"),
        }
    }
}

/// Value of the `component` prop.
#[derive(Clone)]
pub enum TransComponent<C> {
    /// Wrapped around the translation.
    Wrapper(C),
    /// Called with the render props; its output replaces the translation.
    Function(RenderCallback<C>),
}

impl<C: fmt::Debug> fmt::Debug for TransComponent<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wrapper(component) => f.debug_tuple("Wrapper").field(component).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Misconfigured render props. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransDiagnostic {
    /// Both `render` and `component` were supplied; `component` is ignored.
    ConflictingRenderProps,
    /// `render` was not a callback.
    InvalidRender {
        /// Description of the supplied value.
        provided: String,
    },
    /// `component` was not a component.
    InvalidComponent {
        /// Description of the supplied value.
        provided: String,
    },
}

impl fmt::Display for TransDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConflictingRenderProps => f.write_str(
                "You can't use both `component` and `render` prop at the same time. `component` is ignored.",
            ),
            Self::InvalidRender { provided } => write!(
                f,
                "Invalid value supplied to prop `render`. It must be a function, provided {provided}"
            ),
            Self::InvalidComponent { provided } => write!(
                f,
                "Invalid value supplied to prop `component`. It must be a component, provided {provided}"
            ),
        }
    }
}

/// Receives render-prop diagnostics.
pub type DiagnosticReporter = Arc<dyn Fn(&TransDiagnostic) + Send + Sync>;

/// Reporter that logs diagnostics at `error` level.
#[must_use]
pub fn default_reporter() -> DiagnosticReporter {
    Arc::new(|diagnostic: &TransDiagnostic| {
        tracing::error!(%diagnostic, "invalid render props");
    })
}

/// How a translation is presented, resolved once per render call.
pub enum RenderStrategy<C> {
    /// The caller's `render` callback.
    Callback(RenderCallback<C>),
    /// The caller's `component`, wrapped around the translation.
    Wrapper(C),
    /// The caller's `component` function, called with the render props.
    Component(RenderCallback<C>),
    /// The provider's default component.
    Default(RenderCallback<C>),
    /// The translation as-is.
    PlainText,
}

impl<C: Clone> RenderStrategy<C> {
    /// Applies the precedence rules to the supplied props.
    ///
    /// 1. Either prop explicitly `Null` gives plain text.
    /// 2. Both props supplied is reported; otherwise an invalid `render` or
    ///    `component` is reported and the provider default is used.
    /// 3. `render`, then `component`, then the provider default, then plain
    ///    text.
    #[must_use]
    pub fn resolve(
        render: &RenderSlot<RenderCallback<C>>,
        component: &RenderSlot<TransComponent<C>>,
        default: Option<&RenderCallback<C>>,
        report: &DiagnosticReporter,
    ) -> Self {
        if render.is_null() || component.is_null() {
            return Self::PlainText;
        }

        if render.is_supplied() && component.is_supplied() {
            report(&TransDiagnostic::ConflictingRenderProps);
        } else if let RenderSlot::Invalid(provided) = render {
            report(&TransDiagnostic::InvalidRender {
                provided: provided.clone(),
            });
            return Self::fallback(default);
        } else if let RenderSlot::Invalid(provided) = component {
            report(&TransDiagnostic::InvalidComponent {
                provided: provided.clone(),
            });
            return Self::fallback(default);
        }

        if let RenderSlot::Set(callback) = render {
            return Self::Callback(Arc::clone(callback));
        }
        if let RenderSlot::Set(supplied) = component {
            return match supplied {
                TransComponent::Wrapper(wrapper) => Self::Wrapper(wrapper.clone()),
                TransComponent::Function(callback) => Self::Component(Arc::clone(callback)),
            };
        }
        Self::fallback(default)
    }

    fn fallback(default: Option<&RenderCallback<C>>) -> Self {
        default.map_or(Self::PlainText, |callback| Self::Default(Arc::clone(callback)))
    }

    /// Presents `props` according to the strategy.
    #[must_use]
    pub fn apply(&self, props: TransRenderProps<'_, C>) -> Vec<OutputNode<C>> {
        match self {
            Self::Callback(callback) | Self::Component(callback) | Self::Default(callback) => {
                callback(&props)
            }
            Self::Wrapper(component) => vec![OutputNode::Element {
                component: component.clone(),
                children: props.translation,
            }],
            Self::PlainText => props.translation,
        }
    }

    /// Short name of the variant, for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Callback(_) => "callback",
            Self::Wrapper(_) => "wrapper",
            Self::Component(_) => "component",
            Self::Default(_) => "default",
            Self::PlainText => "plain-text",
        }
    }
}

impl<C> fmt::Debug for RenderStrategy<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Callback(_) => "Callback",
            Self::Wrapper(_) => "Wrapper",
            Self::Component(_) => "Component",
            Self::Default(_) => "Default",
            Self::PlainText => "PlainText",
        };
        f.write_str(name)
    }
}
