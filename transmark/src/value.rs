//! Values and components bound into a template at render time.
//!
//! [`Bindings`] holds two tables keyed by [`Key`]: scalar or component values
//! substituted for `{placeholder}` markers, and wrapper components substituted
//! for `<tag>` markers. Positional keys are stored in their decimal string
//! form so both tables share a single lookup path.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;

/// Lookup key for placeholders and tags.
///
/// Indices and names are compared as opaque, case-sensitive strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Self(value.to_string())
    }
}

/// A numeric value, kept integral where possible so plural selection and
/// exact-case matching stay precise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integral value.
    Int(i64),
    /// Fractional or out-of-range value.
    Float(f64),
}

impl Number {
    /// Parses a plain decimal literal such as `3`, `-1` or `2.50`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(int) = trimmed.parse::<i64>() {
            return Some(Self::Int(int));
        }
        let is_decimal = trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E'));
        if !is_decimal {
            return None;
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Self::Float)
    }

    /// Returns the value as `f64`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "plural operands and formatting tolerate precision loss beyond 2^53"
    )]
    pub const fn to_f64(self) -> f64 {
        match self {
            Self::Int(int) => int as f64,
            Self::Float(float) => float,
        }
    }

    /// Subtracts a plural `offset`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "offsets apply to fractional plural operands too"
    )]
    pub fn minus(self, offset: i64) -> Self {
        match self {
            Self::Int(int) => int.checked_sub(offset).map_or_else(
                || Self::Float(self.to_f64() - Self::Int(offset).to_f64()),
                Self::Int,
            ),
            Self::Float(float) => Self::Float(float - Self::Int(offset).to_f64()),
        }
    }

    /// Compares two numbers by value regardless of representation.
    #[must_use]
    #[expect(
        clippy::float_cmp,
        reason = "exact plural cases compare literal values"
    )]
    pub const fn same_value(self, other: Self) -> bool {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left == right,
            _ => self.to_f64() == other.to_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(int) => write!(f, "{int}"),
            Self::Float(float) if float.fract() == 0.0 && float.abs() < 1e15 => {
                write!(f, "{float:.0}")
            }
            Self::Float(float) => write!(f, "{float}"),
        }
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Number {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map_or_else(|_| Self::Float(Self::Int(i64::MAX).to_f64()), Self::Int)
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Self::from(u64::try_from(value).unwrap_or(u64::MAX))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

/// A value bound to a `{placeholder}`.
///
/// `C` is the caller's component descriptor. Component values are emitted
/// verbatim; they are never wrapped around template content.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<C> {
    /// Absent value (`null`/`undefined` in the host convention).
    Null,
    /// Boolean flag; booleans never render.
    Bool(bool),
    /// Numeric value; zero renders as `0`.
    Number(Number),
    /// Plain text; the empty string renders nothing.
    Text(String),
    /// Calendar date for `{value, date}` placeholders.
    Date(NaiveDate),
    /// A single component instance.
    Component(C),
    /// Component instances emitted as siblings, in order.
    Components(Vec<C>),
}

impl<C> Value<C> {
    /// Wraps a component instance.
    #[must_use]
    pub const fn component(component: C) -> Self {
        Self::Component(component)
    }

    /// Collects component instances rendered as consecutive siblings.
    #[must_use]
    pub fn components(components: impl IntoIterator<Item = C>) -> Self {
        Self::Components(components.into_iter().collect())
    }

    /// Reports whether the value renders as nothing.
    ///
    /// Mirrors conditional-rendering rules of component trees: booleans,
    /// `Null` and the empty string disappear while `0` stays visible.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null | Self::Bool(_) => true,
            Self::Text(text) => text.is_empty(),
            Self::Number(_) | Self::Date(_) | Self::Component(_) | Self::Components(_) => false,
        }
    }

    /// Returns the numeric reading of a scalar value.
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => Number::parse(text),
            _ => None,
        }
    }

    /// Stringifies scalar values; component values yield `None`.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => Some(String::new()),
            Self::Bool(flag) => Some(flag.to_string()),
            Self::Number(number) => Some(number.to_string()),
            Self::Text(text) => Some(text.clone()),
            Self::Date(date) => Some(date.to_string()),
            Self::Component(_) | Self::Components(_) => None,
        }
    }
}

impl<C> From<&str> for Value<C> {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl<C> From<String> for Value<C> {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<C> From<bool> for Value<C> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<C> From<Number> for Value<C> {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl<C> From<NaiveDate> for Value<C> {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(impl<C> From<$ty> for Value<C> {
            fn from(value: $ty) -> Self {
                Self::Number(Number::from(value))
            }
        })*
    };
}

value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl<C, T> From<Option<T>> for Value<C>
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A component bound to a `<tag>` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentBinding<C> {
    /// Wraps the tag's bound children.
    One(C),
    /// Emitted as consecutive siblings; the tag's content is not wrapped.
    Many(Vec<C>),
}

/// Values and components supplied for one render call.
#[derive(Debug, Clone)]
pub struct Bindings<C> {
    values: HashMap<Key, Value<C>>,
    components: HashMap<Key, ComponentBinding<C>>,
}

impl<C> Default for Bindings<C> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            components: HashMap::new(),
        }
    }
}

impl<C> Bindings<C> {
    /// Creates empty bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a placeholder value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<Key>, value: impl Into<Value<C>>) -> Self {
        self.insert_value(key, value);
        self
    }

    /// Adds a wrapper component for a tag.
    #[must_use]
    pub fn with_component(mut self, key: impl Into<Key>, component: C) -> Self {
        self.insert_component(key, ComponentBinding::One(component));
        self
    }

    /// Adds a list of components emitted in place of a tag.
    #[must_use]
    pub fn with_components(
        mut self,
        key: impl Into<Key>,
        components: impl IntoIterator<Item = C>,
    ) -> Self {
        self.insert_component(
            key,
            ComponentBinding::Many(components.into_iter().collect()),
        );
        self
    }

    /// Inserts or replaces a placeholder value.
    pub fn insert_value(&mut self, key: impl Into<Key>, value: impl Into<Value<C>>) {
        self.values.insert(key.into(), value.into());
    }

    /// Inserts or replaces a tag binding.
    pub fn insert_component(&mut self, key: impl Into<Key>, binding: ComponentBinding<C>) {
        self.components.insert(key.into(), binding);
    }

    /// Looks up a placeholder value.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value<C>> {
        self.values.get(key)
    }

    /// Looks up a tag binding.
    #[must_use]
    pub fn component(&self, key: &str) -> Option<&ComponentBinding<C>> {
        self.components.get(key)
    }

    /// Returns true when neither table holds an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::null(Value::Null, true)]
    #[case::false_flag(Value::Bool(false), true)]
    #[case::true_flag(Value::Bool(true), true)]
    #[case::empty_text(Value::from(""), true)]
    #[case::zero(Value::from(0), false)]
    #[case::text(Value::from("lol"), false)]
    fn blank_values_follow_conditional_rendering(#[case] value: Value<()>, #[case] blank: bool) {
        assert_eq!(value.is_blank(), blank);
    }

    #[rstest]
    #[case("3", Some(Number::Int(3)))]
    #[case(" -1 ", Some(Number::Int(-1)))]
    #[case("2.5", Some(Number::Float(2.5)))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("inf", None)]
    fn parses_decimal_literals(#[case] text: &str, #[case] expected: Option<Number>) {
        assert_eq!(Number::parse(text), expected);
    }

    #[test]
    fn offset_subtraction_keeps_integers_integral() {
        assert_eq!(Number::Int(5).minus(1), Number::Int(4));
        assert_eq!(Number::Float(1.5).minus(1), Number::Float(0.5));
    }

    #[test]
    fn integral_floats_display_without_fraction() {
        assert_eq!(Number::Float(2.0).to_string(), "2");
        assert_eq!(Number::Float(2.25).to_string(), "2.25");
        assert!(Number::Int(2).same_value(Number::Float(2.0)));
    }

    #[test]
    fn positional_and_named_keys_share_lookup() {
        let bindings: Bindings<&str> = Bindings::new()
            .with_value(0, "zero")
            .with_value("name", "Dave")
            .with_component(1, "span");
        assert_eq!(bindings.value("0"), Some(&Value::from("zero")));
        assert_eq!(bindings.value("name"), Some(&Value::from("Dave")));
        assert_eq!(bindings.component("1"), Some(&ComponentBinding::One("span")));
        assert!(bindings.value("1").is_none());
    }

    #[test]
    fn optional_values_map_to_null() {
        let value: Value<()> = Value::from(None::<&str>);
        assert_eq!(value, Value::Null);
    }
}
