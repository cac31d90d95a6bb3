//! Locale-aware number, currency, and percent formatting.
//!
//! Digits, separators, and grouping come from the CLDR data compiled into
//! `icu`; currency and percent patterns come from `icu_experimental`. The
//! [`NumberFormatOptions`] record only decides precision and which pattern
//! applies.

use fixed_decimal::{Decimal, FloatPrecision};
use icu::decimal::DecimalFormatter;
use icu::decimal::options::{DecimalFormatterOptions, GroupingStrategy};
use icu::locale::Locale;
use icu_experimental::dimension::currency::CurrencyCode;
use icu_experimental::dimension::currency::formatter::CurrencyFormatter;
use icu_experimental::dimension::percent::formatter::PercentFormatter;
use serde::{Deserialize, Serialize};
use tinystr::TinyAsciiStr;
use unic_langid::LanguageIdentifier;
use writeable::Writeable;

use super::icu_locale;
use crate::value::Number;

const MAX_FRACTION_DIGITS: u8 = 20;

/// ISO 4217 currencies without minor units in everyday use.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["CLP", "HUF", "ISK", "JPY", "KRW", "VND"];

/// Presentation style of a number format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberStyle {
    /// Plain decimal number.
    #[default]
    Decimal,
    /// Monetary amount; requires a currency code.
    Currency,
    /// Ratio rendered as a percentage (`0.5` → `50%`).
    Percent,
}

/// Options for a named number format, using Intl-style field names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NumberFormatOptions {
    /// Presentation style.
    #[serde(default)]
    pub style: NumberStyle,
    /// ISO 4217 currency code for [`NumberStyle::Currency`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Minimum digits after the decimal separator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_fraction_digits: Option<u8>,
    /// Maximum digits after the decimal separator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_fraction_digits: Option<u8>,
    /// Whether to insert group separators in decimal output. Defaults to
    /// the locale's grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_grouping: Option<bool>,
}

impl NumberFormatOptions {
    /// Options for a currency amount in `code`.
    #[must_use]
    pub fn currency(code: impl Into<String>) -> Self {
        Self {
            style: NumberStyle::Currency,
            currency: Some(code.into()),
            ..Self::default()
        }
    }

    /// Options for a percentage.
    #[must_use]
    pub fn percent() -> Self {
        Self {
            style: NumberStyle::Percent,
            ..Self::default()
        }
    }

    /// Options for an integer (no fraction digits).
    #[must_use]
    pub fn integer() -> Self {
        Self {
            maximum_fraction_digits: Some(0),
            ..Self::default()
        }
    }

    /// Sets the minimum fraction digits.
    #[must_use]
    pub const fn with_minimum_fraction_digits(mut self, digits: u8) -> Self {
        self.minimum_fraction_digits = Some(digits);
        self
    }

    /// Sets the maximum fraction digits.
    #[must_use]
    pub const fn with_maximum_fraction_digits(mut self, digits: u8) -> Self {
        self.maximum_fraction_digits = Some(digits);
        self
    }

    /// Enables or disables group separators.
    #[must_use]
    pub const fn with_grouping(mut self, enabled: bool) -> Self {
        self.use_grouping = Some(enabled);
        self
    }

    /// Fraction digit bounds as `(min, max)`, filled in with Intl defaults
    /// for the style.
    fn fraction_bounds(&self) -> (i16, i16) {
        let default_digits = match self.style {
            NumberStyle::Currency => self.currency.as_deref().map_or(2, currency_digits),
            NumberStyle::Percent => 0,
            NumberStyle::Decimal => 3,
        };
        let default_min = match self.style {
            NumberStyle::Currency => default_digits,
            NumberStyle::Decimal | NumberStyle::Percent => 0,
        };
        let min = self
            .minimum_fraction_digits
            .unwrap_or(default_min)
            .min(MAX_FRACTION_DIGITS);
        let max = self
            .maximum_fraction_digits
            .unwrap_or_else(|| default_digits.max(min))
            .clamp(min, MAX_FRACTION_DIGITS);
        (i16::from(min), i16::from(max))
    }

    fn grouping(&self) -> Option<GroupingStrategy> {
        match self.use_grouping {
            Some(false) => Some(GroupingStrategy::Never),
            Some(true) | None => None,
        }
    }
}

/// Formats `value` for `locale` according to `options`.
///
/// Values that cannot be represented as a decimal, and locales without
/// formatting data, fall back to the plain stringified value.
#[must_use]
pub fn format_number(
    value: Number,
    options: &NumberFormatOptions,
    locale: &LanguageIdentifier,
) -> String {
    let scaled = match options.style {
        NumberStyle::Percent => percent_of(value),
        NumberStyle::Decimal | NumberStyle::Currency => value,
    };
    let Some(decimal) = to_decimal(scaled, options.fraction_bounds()) else {
        tracing::debug!(%value, "number has no decimal representation");
        return value.to_string();
    };
    let icu = icu_locale(locale);

    let formatted = match (options.style, options.currency.as_deref()) {
        (NumberStyle::Currency, Some(code)) => format_currency(&decimal, code, &icu),
        (NumberStyle::Currency, None) => {
            tracing::debug!("currency format without a currency code");
            format_decimal(&decimal, options.grouping(), &icu)
        }
        (NumberStyle::Percent, _) => format_percent(&decimal, &icu),
        (NumberStyle::Decimal, _) => format_decimal(&decimal, options.grouping(), &icu),
    };
    formatted.unwrap_or_else(|| value.to_string())
}

/// Formats `value` with the locale's default decimal format.
#[must_use]
pub fn format_default(value: Number, locale: &LanguageIdentifier) -> String {
    format_number(value, &NumberFormatOptions::default(), locale)
}

fn to_decimal(value: Number, (min, max): (i16, i16)) -> Option<Decimal> {
    let mut decimal = match value {
        Number::Int(int) => Decimal::from(int),
        Number::Float(float) => Decimal::try_from_f64(float, FloatPrecision::RoundTrip).ok()?,
    };
    if *decimal.magnitude_range().start() < -max {
        decimal.round(-max);
    }
    decimal.trim_end();
    decimal.pad_end(-min);
    Some(decimal)
}

fn format_decimal(
    decimal: &Decimal,
    grouping: Option<GroupingStrategy>,
    locale: &Locale,
) -> Option<String> {
    let mut options = DecimalFormatterOptions::default();
    options.grouping_strategy = grouping;
    let formatter = DecimalFormatter::try_new(locale.clone().into(), options)
        .inspect_err(|err| tracing::debug!(locale = %locale, error = %err, "no decimal data"))
        .ok()?;
    Some(formatter.format(decimal).to_string())
}

fn format_currency(decimal: &Decimal, code: &str, locale: &Locale) -> Option<String> {
    let Ok(tiny) = TinyAsciiStr::<3>::try_from_str(&code.to_ascii_uppercase()) else {
        tracing::debug!(code, "currency code is not three ASCII letters");
        return None;
    };
    let formatter = CurrencyFormatter::try_new(locale.clone().into(), Default::default())
        .inspect_err(|err| tracing::debug!(locale = %locale, error = %err, "no currency data"))
        .ok()?;
    Some(
        formatter
            .format_fixed_decimal(decimal, CurrencyCode(tiny))
            .write_to_string()
            .into_owned(),
    )
}

fn format_percent(decimal: &Decimal, locale: &Locale) -> Option<String> {
    let formatter = PercentFormatter::try_new(locale.clone().into(), Default::default())
        .inspect_err(|err| tracing::debug!(locale = %locale, error = %err, "no percent data"))
        .ok()?;
    Some(formatter.format(decimal).write_to_string().into_owned())
}

#[expect(
    clippy::float_arithmetic,
    reason = "percent scaling of fractional ratios"
)]
fn percent_of(value: Number) -> Number {
    match value {
        Number::Int(int) => int
            .checked_mul(100)
            .map_or_else(|| Number::Float(value.to_f64() * 100.0), Number::Int),
        Number::Float(float) => Number::Float(float * 100.0),
    }
}

fn currency_digits(code: &str) -> u8 {
    let upper = code.to_ascii_uppercase();
    if ZERO_DECIMAL_CURRENCIES.contains(&upper.as_str()) {
        0
    } else {
        2
    }
}
