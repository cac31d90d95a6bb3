//! Error types surfaced by parsing, catalog loading, configuration, and
//! rendering.
//!
//! Missing bindings and unknown format styles are deliberately absent: they
//! degrade to visible passthrough text instead of failing a render.

use camino::Utf8PathBuf;
use thiserror::Error;

/// A malformed template. Fatal to the render call that parsed it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A `<key>` tag was still open at the end of its template.
    #[error("unterminated tag <{key}> opened at byte {offset}")]
    UnterminatedTag {
        /// Key of the open tag.
        key: String,
        /// Byte offset of the opening marker.
        offset: usize,
    },

    /// A closing tag did not match the innermost open tag.
    #[error("unbalanced tag: expected </{expected}> but found </{found}> at byte {offset}")]
    UnbalancedTag {
        /// Key of the innermost open tag.
        expected: String,
        /// Key of the closing marker.
        found: String,
        /// Byte offset of the closing marker.
        offset: usize,
    },

    /// A closing tag appeared with no open tag.
    #[error("closing tag </{key}> at byte {offset} has no opening tag")]
    UnexpectedClosingTag {
        /// Key of the closing marker.
        key: String,
        /// Byte offset of the closing marker.
        offset: usize,
    },

    /// A `{` was never closed.
    #[error("unterminated placeholder opened at byte {offset}")]
    UnterminatedPlaceholder {
        /// Byte offset of the opening brace.
        offset: usize,
    },

    /// A placeholder without a key, such as `{}`.
    #[error("empty placeholder at byte {offset}")]
    EmptyPlaceholder {
        /// Byte offset of the opening brace.
        offset: usize,
    },

    /// A `}` outside any placeholder.
    #[error("unexpected '}}' at byte {offset}")]
    UnexpectedBrace {
        /// Byte offset of the brace.
        offset: usize,
    },

    /// Placeholder type or style syntax is malformed.
    #[error("invalid argument for placeholder '{key}' at byte {offset}: {reason}")]
    InvalidArgument {
        /// Placeholder key.
        key: String,
        /// Byte offset of the offending token.
        offset: usize,
        /// What was expected.
        reason: String,
    },

    /// A plural or select case label is not valid.
    #[error("invalid case label '{label}' at byte {offset}")]
    InvalidCaseLabel {
        /// Label text.
        label: String,
        /// Byte offset of the label.
        offset: usize,
    },

    /// The same case label appears twice in one table.
    #[error("duplicate case label '{label}' at byte {offset}")]
    DuplicateCase {
        /// Label text.
        label: String,
        /// Byte offset of the placeholder owning the table.
        offset: usize,
    },

    /// `offset:` is not followed by an integer.
    #[error("invalid plural offset '{text}' at byte {offset}")]
    InvalidOffset {
        /// Offending text.
        text: String,
        /// Byte offset of the `offset:` token.
        offset: usize,
    },

    /// A plural or select table lacks the mandatory `other` case.
    #[error("case table for '{key}' at byte {offset} has no 'other' case")]
    MissingOtherCase {
        /// Placeholder key.
        key: String,
        /// Byte offset of the placeholder.
        offset: usize,
    },
}

/// Invalid plural or select case table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseTableError {
    /// The mandatory `other` case is missing.
    #[error("case table has no 'other' case")]
    MissingOther,
    /// A label occurs more than once.
    #[error("case label '{0}' occurs more than once")]
    Duplicate(String),
}

/// Failures while rendering a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TransError {
    /// The resolved template is malformed.
    #[error("failed to parse message '{id}': {source}")]
    Parse {
        /// Message id being rendered.
        id: String,
        /// Underlying parse failure.
        #[source]
        source: ParseError,
    },

    /// Rendering was attempted without a provider context.
    #[error(
        "message was rendered without an i18n provider.\nAttempted to render message: {} id: {id}. Make sure a provider is supplied.",
        .message.as_deref().unwrap_or("undefined")
    )]
    MissingProvider {
        /// Message id being rendered.
        id: String,
        /// Fallback message, when supplied.
        message: Option<String>,
    },
}

/// Failures while reading message catalogs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// The catalog directory has no file for the locale.
    #[error("no catalog for locale {locale} in {dir}")]
    MissingLocale {
        /// Locale requested.
        locale: String,
        /// Directory searched.
        dir: Utf8PathBuf,
    },

    /// Reading a catalog file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File or directory involved.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A TOML catalog failed to parse.
    #[error("invalid TOML catalog for {locale}: {source}")]
    Toml {
        /// Locale of the catalog.
        locale: String,
        /// Underlying error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A JSON catalog failed to parse.
    #[cfg(feature = "serde_json")]
    #[error("invalid JSON catalog for {locale}: {source}")]
    Json {
        /// Locale of the catalog.
        locale: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A catalog entry is not a string template.
    #[error("catalog entry '{id}' for {locale} must be a string, found {found}")]
    InvalidEntry {
        /// Message id of the entry.
        id: String,
        /// Locale of the catalog.
        locale: String,
        /// Kind of value found.
        found: String,
    },
}

/// Failures while loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Layered configuration could not be extracted.
    #[error("failed to gather configuration: {0}")]
    Gathering(#[from] Box<figment::Error>),

    /// A locale identifier did not parse.
    #[error("invalid locale '{value}': {message}")]
    InvalidLocale {
        /// Text supplied.
        value: String,
        /// Parser message.
        message: String,
    },

    /// A configured catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Gathering(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_provider_names_message_and_id() {
        let with_message = TransError::MissingProvider {
            id: String::from("unknown"),
            message: Some(String::from("some valid message")),
        };
        assert_eq!(
            with_message.to_string(),
            "message was rendered without an i18n provider.\nAttempted to render message: some valid message id: unknown. Make sure a provider is supplied."
        );

        let without_message = TransError::MissingProvider {
            id: String::from("unknown"),
            message: None,
        };
        assert!(
            without_message
                .to_string()
                .contains("Attempted to render message: undefined id: unknown.")
        );
    }

    #[test]
    fn parse_errors_report_offsets() {
        let err = ParseError::UnterminatedTag {
            key: String::from("0"),
            offset: 0,
        };
        assert_eq!(err.to_string(), "unterminated tag <0> opened at byte 0");
    }
}
