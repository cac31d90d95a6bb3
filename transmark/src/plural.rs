//! Plural and select case resolution.
//!
//! Category rules come from a [`PluralCategorizer`]; [`CldrPlurals`] is the
//! default implementation backed by the CLDR tables in `intl_pluralrules`.

use std::fmt;

use intl_pluralrules::{PluralRuleType, PluralRules};
use unic_langid::LanguageIdentifier;

use crate::syntax::{CaseTable, PluralSpec, TokenTree};
use crate::value::Number;

/// Which CLDR rule set a plural placeholder uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralKind {
    /// `plural`: counting ("1 file", "2 files").
    Cardinal,
    /// `selectordinal`: ranking ("1st", "2nd").
    Ordinal,
}

impl PluralKind {
    /// Keyword introducing the argument in templates.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Cardinal => "plural",
            Self::Ordinal => "selectordinal",
        }
    }
}

/// A CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    /// `zero`.
    Zero,
    /// `one`.
    One,
    /// `two`.
    Two,
    /// `few`.
    Few,
    /// `many`.
    Many,
    /// `other`.
    Other,
}

impl PluralCategory {
    /// Maps a case label to its category, if it names one.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "zero" => Some(Self::Zero),
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            "few" => Some(Self::Few),
            "many" => Some(Self::Many),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Case label for the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<intl_pluralrules::PluralCategory> for PluralCategory {
    fn from(value: intl_pluralrules::PluralCategory) -> Self {
        match value {
            intl_pluralrules::PluralCategory::ZERO => Self::Zero,
            intl_pluralrules::PluralCategory::ONE => Self::One,
            intl_pluralrules::PluralCategory::TWO => Self::Two,
            intl_pluralrules::PluralCategory::FEW => Self::Few,
            intl_pluralrules::PluralCategory::MANY => Self::Many,
            intl_pluralrules::PluralCategory::OTHER => Self::Other,
        }
    }
}

/// Chooses the plural category of a number for one locale.
pub trait PluralCategorizer: Send + Sync {
    /// Category of `value` under the `kind` rules.
    fn category(&self, kind: PluralKind, value: Number) -> PluralCategory;
}

/// Categorizer that always answers [`PluralCategory::Other`].
#[derive(Debug, Default, Clone, Copy)]
pub struct OtherOnly;

impl PluralCategorizer for OtherOnly {
    fn category(&self, _kind: PluralKind, _value: Number) -> PluralCategory {
        PluralCategory::Other
    }
}

/// CLDR cardinal and ordinal rules for one locale.
///
/// Locales without CLDR data fall back to `other` for every value.
pub struct CldrPlurals {
    locale: LanguageIdentifier,
    cardinal: Option<PluralRules>,
    ordinal: Option<PluralRules>,
}

impl CldrPlurals {
    /// Loads the rule sets for `locale`.
    #[must_use]
    pub fn new(locale: LanguageIdentifier) -> Self {
        let cardinal = rules(&locale, PluralRuleType::CARDINAL);
        let ordinal = rules(&locale, PluralRuleType::ORDINAL);
        Self {
            locale,
            cardinal,
            ordinal,
        }
    }

    /// Locale whose rules are loaded.
    #[must_use]
    pub const fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }
}

fn rules(locale: &LanguageIdentifier, kind: PluralRuleType) -> Option<PluralRules> {
    PluralRules::create(locale.clone(), kind)
        .inspect_err(|reason| tracing::debug!(locale = %locale, reason, "no plural rules for locale"))
        .ok()
}

impl fmt::Debug for CldrPlurals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CldrPlurals")
            .field("locale", &self.locale)
            .field("cardinal", &self.cardinal.is_some())
            .field("ordinal", &self.ordinal.is_some())
            .finish()
    }
}

impl PluralCategorizer for CldrPlurals {
    fn category(&self, kind: PluralKind, value: Number) -> PluralCategory {
        let rules = match kind {
            PluralKind::Cardinal => self.cardinal.as_ref(),
            PluralKind::Ordinal => self.ordinal.as_ref(),
        };
        let Some(rules) = rules else {
            return PluralCategory::Other;
        };
        let selected = match value {
            Number::Int(int) => rules.select(int),
            Number::Float(float) => rules.select(float),
        };
        selected.map_or(PluralCategory::Other, PluralCategory::from)
    }
}

/// Picks the case of a plural table for `value`.
///
/// Returns the chosen sub-tree and the offset-adjusted value that `#`
/// renders. Resolution order: exact `=N` on the adjusted value, then the CLDR
/// category, then `other`.
#[must_use]
pub fn resolve_plural<'a>(
    spec: &'a PluralSpec,
    value: Number,
    categorizer: &dyn PluralCategorizer,
) -> (&'a TokenTree, Number) {
    let adjusted = value.minus(spec.offset);
    if let Some(exact) = spec.cases.exact(adjusted) {
        return (exact, adjusted);
    }
    let category = categorizer.category(spec.kind, adjusted);
    let chosen = spec
        .cases
        .keyword(category.as_str())
        .unwrap_or_else(|| spec.cases.other());
    (chosen, adjusted)
}

/// Picks the case of a select table whose label equals `value`, else `other`.
#[must_use]
pub fn resolve_select<'a>(table: &'a CaseTable, value: &str) -> &'a TokenTree {
    table.keyword(value).unwrap_or_else(|| table.other())
}
