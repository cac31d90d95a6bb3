//! Case tables for `plural`, `selectordinal`, and `select` arguments.

use std::fmt;

use super::TokenTree;
use crate::error::CaseTableError;
use crate::value::Number;

static EMPTY_CASE: TokenTree = TokenTree::new(Vec::new());

/// Label selecting one case of a table.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseLabel {
    /// `=N`: matches a literal numeric value.
    Exact(Number),
    /// A plural category (`one`, `few`, ...) or a select label.
    Keyword(String),
}

impl CaseLabel {
    fn same_label(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exact(left), Self::Exact(right)) => left.same_value(*right),
            (Self::Keyword(left), Self::Keyword(right)) => left == right,
            _ => false,
        }
    }

    fn is_other(&self) -> bool {
        matches!(self, Self::Keyword(keyword) if keyword == "other")
    }
}

impl fmt::Display for CaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(number) => write!(f, "={number}"),
            Self::Keyword(keyword) => f.write_str(keyword),
        }
    }
}

/// Ordered case table with a mandatory `other` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseTable {
    cases: Vec<(CaseLabel, TokenTree)>,
}

impl CaseTable {
    /// Builds a table, enforcing unique labels and an `other` case.
    ///
    /// # Errors
    ///
    /// Returns [`CaseTableError::Duplicate`] when a label repeats and
    /// [`CaseTableError::MissingOther`] when no `other` case exists.
    pub fn new(cases: Vec<(CaseLabel, TokenTree)>) -> Result<Self, CaseTableError> {
        for (position, (label, _)) in cases.iter().enumerate() {
            let repeated = cases
                .iter()
                .take(position)
                .any(|(earlier, _)| earlier.same_label(label));
            if repeated {
                return Err(CaseTableError::Duplicate(label.to_string()));
            }
        }
        if !cases.iter().any(|(label, _)| label.is_other()) {
            return Err(CaseTableError::MissingOther);
        }
        Ok(Self { cases })
    }

    /// Finds the case for an exact numeric match.
    #[must_use]
    pub fn exact(&self, value: Number) -> Option<&TokenTree> {
        self.cases.iter().find_map(|(label, tree)| match label {
            CaseLabel::Exact(number) if number.same_value(value) => Some(tree),
            _ => None,
        })
    }

    /// Finds the case for a keyword label.
    #[must_use]
    pub fn keyword(&self, keyword: &str) -> Option<&TokenTree> {
        self.cases.iter().find_map(|(label, tree)| match label {
            CaseLabel::Keyword(candidate) if candidate == keyword => Some(tree),
            _ => None,
        })
    }

    /// Returns the `other` case.
    #[must_use]
    pub fn other(&self) -> &TokenTree {
        self.keyword("other").unwrap_or(&EMPTY_CASE)
    }

    /// Iterates cases in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&CaseLabel, &TokenTree)> {
        self.cases.iter().map(|(label, tree)| (label, tree))
    }
}
