//! Type-flexible comparison primitives.
//!
//! Record values may be numbers, dates or text, and rule operands are always
//! text. Comparisons walk a fixed fallback chain (date, then number, then
//! string) and report "incomparable" as `None` rather than failing.

use std::cmp::Ordering;

use mediqc_model::{Value, parse_f64};

/// Right-hand side of a field-vs-literal ordering check, resolved once per rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Number(f64),
    Text(&'a str),
}

impl<'a> Literal<'a> {
    /// Numeric when the literal parses as a number, text otherwise.
    pub fn parse(raw: &'a str) -> Self {
        match parse_f64(raw) {
            Some(number) => Self::Number(number),
            None => Self::Text(raw),
        }
    }
}

/// Literal equality on the canonical text of a non-null value.
///
/// An empty-string cell equals the literal `""`; a null never equals anything.
pub fn text_equals(value: &Value, literal: &str) -> bool {
    !matches!(value, Value::Empty) && value.as_text() == literal
}

/// Literal (non-pattern) substring test on the canonical text.
pub fn contains_literal(value: &Value, needle: &str) -> bool {
    !value.is_empty() && value.as_text().contains(needle)
}

/// Whether a non-null value's canonical text is one of `candidates`.
pub fn is_one_of(value: &Value, candidates: &[String]) -> bool {
    if matches!(value, Value::Empty) {
        return false;
    }
    let text = value.as_text();
    candidates.iter().any(|candidate| *candidate == text)
}

/// Field-vs-field ordering: chronological when both sides are dates,
/// otherwise the native ordering of the raw values.
pub fn compare_fields(left: &Value, right: &Value) -> Option<Ordering> {
    if let (Some(left), Some(right)) = (left.as_date(), right.as_date()) {
        return Some(left.cmp(&right));
    }
    compare_native(left, right)
}

/// Ordering of two values of the same underlying type. Mixed types and
/// empty values are incomparable.
pub fn compare_native(left: &Value, right: &Value) -> Option<Ordering> {
    if left.is_empty() || right.is_empty() {
        return None;
    }
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => left.partial_cmp(right),
        (Value::Text(left), Value::Text(right)) => Some(left.cmp(right)),
        (Value::Date(left), Value::Date(right)) => Some(left.cmp(right)),
        (Value::Bool(left), Value::Bool(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

/// Field-vs-literal ordering.
///
/// A numeric literal compares numerically and values that do not coerce to
/// a number are incomparable; a text literal compares lexicographically.
pub fn compare_literal(value: &Value, literal: Literal<'_>) -> Option<Ordering> {
    match literal {
        Literal::Number(number) => value.as_number()?.partial_cmp(&number),
        Literal::Text(text) => {
            if value.is_empty() {
                None
            } else {
                Some(value.as_text().as_ref().cmp(text))
            }
        }
    }
}

/// A `greater_than` rule asserts `field > operand`; it is violated when the
/// field is less than or equal to the operand.
pub fn violates_greater_than(ordering: Option<Ordering>) -> bool {
    matches!(ordering, Some(Ordering::Less | Ordering::Equal))
}

/// A `less_than` rule asserts `field < operand`; it is violated when the
/// field is greater than or equal to the operand.
pub fn violates_less_than(ordering: Option<Ordering>) -> bool {
    matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
}
