//! Error types for the `transmark` binary.

use thiserror::Error;
use transmark::{CatalogError, ConfigError, TransError};

/// Errors surfaced by `transmark` commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// Configuration could not be gathered or applied.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A catalog could not be listed or loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The requested message failed to render.
    #[error(transparent)]
    Render(#[from] TransError),

    /// `check` needs a catalog directory.
    #[error("no catalog directory configured; set catalog_dir or TRANSMARK_CATALOG_DIR")]
    NoCatalogDir,

    /// A locale argument is not a valid identifier.
    #[error("failed to parse locale '{value}': {message}")]
    InvalidLocale {
        /// The rejected argument.
        value: String,
        /// Parser diagnostic.
        message: String,
    },

    /// `check` found malformed templates.
    #[error("{count} invalid template(s) found")]
    InvalidTemplates {
        /// Number of templates that failed to parse.
        count: usize,
    },

    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
