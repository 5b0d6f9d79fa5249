//! Cell values of a medical record dataset.
//!
//! Values arrive from external parsers already typed (numbers, dates) or as
//! raw text. Rules compare them through the coercions defined here; every
//! coercion is fallible and returns `None` instead of an error.

use std::borrow::Cow;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Date-only layouts found in discharge records.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d", "%Y年%m月%d日"];

/// Date-time layouts. `%.f` also accepts a missing fractional part.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S%.f",
    "%Y.%m.%d %H:%M",
    "%Y年%m月%d日 %H:%M:%S",
    "%Y年%m月%d日 %H:%M",
];

/// A single field value of a [`Record`](crate::Record).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Null or absent.
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Date(NaiveDateTime),
    Text(String),
}

impl Value {
    /// Builds a text value; the empty string stays a `Text` so that it is
    /// still distinguishable from null when rendered.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns true for null values and the empty string.
    ///
    /// Whitespace-only text, numeric zero and `false` are not empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Canonical text rendering used for equality, containment and
    /// lexicographic comparison.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Empty => Cow::Borrowed(""),
            Self::Bool(true) => Cow::Borrowed("True"),
            Self::Bool(false) => Cow::Borrowed("False"),
            Self::Number(number) => Cow::Owned(format_numeric(*number)),
            Self::Date(date) => Cow::Owned(format_date(date)),
            Self::Text(text) => Cow::Borrowed(text.as_str()),
        }
    }

    /// Numeric coercion. Text is trimmed and parsed; booleans count as 1/0.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => parse_f64(text),
            Self::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            Self::Empty | Self::Date(_) => None,
        }
    }

    /// Date coercion. Only dates and date-like text convert.
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(text) => parse_datetime(text),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Formats a number the way it would be typed into a spreadsheet cell.
pub fn format_numeric(value: f64) -> String {
    // f64 Display already omits a trailing ".0".
    value.to_string()
}

/// Parses a string as f64, returning None for invalid, empty or non-finite
/// input (`"nan"` and `"inf"` stay text).
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Parses date or date-time text in any of the supported layouts.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
}

fn format_date(value: &NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
