//! Locale date formatting.
//!
//! Dates are `chrono::NaiveDate` values (or ISO `YYYY-MM-DD` text); the
//! locale patterns and the display calendar come from `icu::datetime`.

use chrono::{Datelike, NaiveDate};
use icu::calendar::{Date, Iso};
use icu::datetime::DateTimeFormatter;
use icu::datetime::fieldsets::{self, enums::DateFieldSet};
use icu::datetime::options::Length;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use super::icu_locale;

/// Date presentation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateStyle {
    /// The locale's most compact, usually numeric, form.
    #[default]
    Short,
    /// Abbreviated month names where the locale uses them.
    Medium,
    /// Full month names.
    Long,
    /// ISO 8601 `YYYY-MM-DD`, independent of the locale.
    Iso,
}

impl DateStyle {
    const fn length(self) -> Option<Length> {
        match self {
            Self::Short => Some(Length::Short),
            Self::Medium => Some(Length::Medium),
            Self::Long => Some(Length::Long),
            Self::Iso => None,
        }
    }
}

/// Options for a named date format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DateFormatOptions {
    /// Presentation style.
    pub date_style: DateStyle,
}

impl DateFormatOptions {
    /// Options for `style`.
    #[must_use]
    pub const fn new(date_style: DateStyle) -> Self {
        Self { date_style }
    }
}

/// Formats `date` for `locale`.
///
/// Locales without date data, and dates outside the range `icu` accepts,
/// fall back to ISO output.
#[must_use]
pub fn format_date(
    date: NaiveDate,
    options: DateFormatOptions,
    locale: &LanguageIdentifier,
) -> String {
    let Some(length) = options.date_style.length() else {
        return date.to_string();
    };
    let Some(iso) = to_icu_date(date) else {
        tracing::debug!(%date, "date outside the ICU calendar range");
        return date.to_string();
    };
    let icu = icu_locale(locale);
    let field_set = DateFieldSet::YMD(fieldsets::YMD::for_length(length));
    DateTimeFormatter::<DateFieldSet>::try_new(icu.clone().into(), field_set).map_or_else(
        |err| {
            tracing::debug!(locale = %icu, error = %err, "no date data; using ISO form");
            date.to_string()
        },
        |formatter| formatter.format(&iso).to_string(),
    )
}

fn to_icu_date(date: NaiveDate) -> Option<Date<Iso>> {
    let month = u8::try_from(date.month()).ok()?;
    let day = u8::try_from(date.day()).ok()?;
    Date::try_new_iso(date.year(), month, day).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use unic_langid::langid;

    #[fixture]
    fn fifth_of_january() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).expect("valid date")
    }

    #[rstest]
    #[case::british(langid!("en-GB"))]
    #[case::brazilian(langid!("pt-BR"))]
    #[case::french(langid!("fr"))]
    fn short_dates_put_the_day_first(
        fifth_of_january: NaiveDate,
        #[case] locale: LanguageIdentifier,
    ) {
        let formatted = format_date(fifth_of_january, DateFormatOptions::default(), &locale);
        assert!(formatted.starts_with("05/01/"), "unexpected output {formatted}");
    }

    #[rstest]
    fn american_short_dates_put_the_month_first(fifth_of_january: NaiveDate) {
        let formatted =
            format_date(fifth_of_january, DateFormatOptions::default(), &langid!("en-US"));
        assert!(formatted.starts_with("1/5/"), "unexpected output {formatted}");
    }

    #[rstest]
    fn medium_dates_use_month_names(fifth_of_january: NaiveDate) {
        let options = DateFormatOptions::new(DateStyle::Medium);
        assert_eq!(format_date(fifth_of_january, options, &langid!("en-US")), "Jan 5, 2024");
    }

    #[rstest]
    #[case(langid!("en"))]
    #[case(langid!("ja"))]
    fn iso_style_ignores_locale(fifth_of_january: NaiveDate, #[case] locale: LanguageIdentifier) {
        let options = DateFormatOptions::new(DateStyle::Iso);
        assert_eq!(format_date(fifth_of_january, options, &locale), "2024-01-05");
    }

    #[test]
    fn styles_deserialize_from_camel_case() {
        let options: DateFormatOptions =
            toml::from_str("dateStyle = \"long\"").expect("valid options");
        assert_eq!(options, DateFormatOptions::new(DateStyle::Long));
    }
}
