//! Format hooks for `{value, number, style}` and `{value, date, style}`.
//!
//! Styles resolve against caller-supplied [`FormatTable`]s first, then the
//! built-in style names. Unknown styles never fail a render: the raw value is
//! stringified instead.

mod date;
mod number;

use std::collections::BTreeMap;
use std::fmt;

use icu::locale::{Locale, locale};
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

pub use date::{DateFormatOptions, DateStyle, format_date};
pub use number::{NumberFormatOptions, NumberStyle, format_default, format_number};

use crate::value::{Number, Value};

/// The `type` part of a `{name, type, style}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// `number`.
    Number,
    /// `date`.
    Date,
    /// `time`; no built-in styles, values pass through.
    Time,
    /// Any other keyword; values pass through.
    Other(String),
}

impl FormatKind {
    /// Maps a placeholder type keyword to its kind.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "number" => Self::Number,
            "date" => Self::Date,
            "time" => Self::Time,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the keyword used in templates.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Number => "number",
            Self::Date => "date",
            Self::Time => "time",
            Self::Other(keyword) => keyword,
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options record for one named format.
///
/// Deserializes untagged: a record with `dateStyle` is a date format,
/// anything else a number format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatOptions {
    /// Date presentation.
    Date(DateFormatOptions),
    /// Number presentation.
    Number(NumberFormatOptions),
}

impl From<NumberFormatOptions> for FormatOptions {
    fn from(value: NumberFormatOptions) -> Self {
        Self::Number(value)
    }
}

impl From<DateFormatOptions> for FormatOptions {
    fn from(value: DateFormatOptions) -> Self {
        Self::Date(value)
    }
}

/// Named formats keyed by style name.
pub type FormatTable = BTreeMap<String, FormatOptions>;

/// Applies format specs to bound values for one locale.
///
/// Tables are consulted in the order they were layered; the first table that
/// defines a style wins.
#[derive(Debug, Clone)]
pub struct FormatHook<'a> {
    locale: &'a LanguageIdentifier,
    layers: Vec<&'a FormatTable>,
}

impl<'a> FormatHook<'a> {
    /// Creates a hook with no named formats.
    #[must_use]
    pub const fn new(locale: &'a LanguageIdentifier) -> Self {
        Self {
            locale,
            layers: Vec::new(),
        }
    }

    /// Adds a table consulted after any previously layered tables.
    #[must_use]
    pub fn with_layer(mut self, table: &'a FormatTable) -> Self {
        self.layers.push(table);
        self
    }

    /// Locale the hook formats for.
    #[must_use]
    pub const fn locale(&self) -> &'a LanguageIdentifier {
        self.locale
    }

    fn named(&self, style: &str) -> Option<&'a FormatOptions> {
        self.layers.iter().find_map(|table| table.get(style))
    }

    /// Formats `value` for a placeholder of `kind` with optional `style`.
    ///
    /// Returns `None` for component values, which are never formatted.
    #[must_use]
    pub fn format<C>(
        &self,
        value: &Value<C>,
        kind: &FormatKind,
        style: Option<&str>,
    ) -> Option<String> {
        let raw = value.to_text()?;
        let options = match style {
            Some(name) => {
                let Some(options) = self.named(name).cloned().or_else(|| builtin(kind, name))
                else {
                    tracing::debug!(style = name, kind = %kind, "unknown format style");
                    return Some(raw);
                };
                options
            }
            None => match kind {
                FormatKind::Number => FormatOptions::Number(NumberFormatOptions::default()),
                FormatKind::Date => FormatOptions::Date(DateFormatOptions::default()),
                FormatKind::Time | FormatKind::Other(_) => return Some(raw),
            },
        };
        Some(self.apply(value, &options).unwrap_or(raw))
    }

    /// Formats a number with the locale's default decimal format.
    #[must_use]
    pub fn default_number(&self, value: Number) -> String {
        format_default(value, self.locale)
    }

    fn apply<C>(&self, value: &Value<C>, options: &FormatOptions) -> Option<String> {
        match options {
            FormatOptions::Number(number) => value
                .as_number()
                .map(|parsed| format_number(parsed, number, self.locale)),
            FormatOptions::Date(date) => {
                let parsed = match value {
                    Value::Date(date_value) => Some(*date_value),
                    Value::Text(text) => text.parse().ok(),
                    _ => None,
                }?;
                Some(format_date(parsed, *date, self.locale))
            }
        }
    }
}

fn builtin(kind: &FormatKind, style: &str) -> Option<FormatOptions> {
    match (kind, style) {
        (FormatKind::Number, "integer") => Some(NumberFormatOptions::integer().into()),
        (FormatKind::Number, "percent") => Some(NumberFormatOptions::percent().into()),
        (FormatKind::Date, "short") => Some(DateFormatOptions::new(DateStyle::Short).into()),
        (FormatKind::Date, "medium") => Some(DateFormatOptions::new(DateStyle::Medium).into()),
        (FormatKind::Date, "long") => Some(DateFormatOptions::new(DateStyle::Long).into()),
        (FormatKind::Date, "iso") => Some(DateFormatOptions::new(DateStyle::Iso).into()),
        _ => None,
    }
}

/// Converts a language identifier into the `icu` locale type.
fn icu_locale(locale: &LanguageIdentifier) -> Locale {
    locale.to_string().parse().unwrap_or_else(|err| {
        tracing::debug!(locale = %locale, error = %err, "locale unknown to icu; using root");
        locale!("und")
    })
}
