//! Date Parser Module
//!
//! Normalizes the date values found in case records into a single
//! `NaiveDate`. Data came from manual entry, spreadsheet imports and HTML
//! date inputs, so the parser is liberal on read but the format order is fixed:
//! 1. `YYYY-MM-DD`
//! 2. `DD-MM-YYYY`
//!
//! The parser never panics. Anything it cannot read becomes a `ParseFailure`.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

use crate::utils::constants::{DATE_FORMATS, ISO_DATE_FORMAT};

/// Loosely-typed date input as it arrives from storage or a request body
#[derive(Debug, Clone, PartialEq)]
pub enum RawDate {
    /// Already-parsed calendar date
    Date(NaiveDate),
    /// Already-parsed date-time, time-of-day is ignored
    DateTime(NaiveDateTime),
    /// Raw string value
    Text(String),
    /// Missing value (NULL column, absent JSON key)
    Absent,
    /// A value of some other type (number, bool, object, ...)
    Unsupported,
}

impl From<NaiveDate> for RawDate {
    fn from(date: NaiveDate) -> Self {
        RawDate::Date(date)
    }
}

impl From<NaiveDateTime> for RawDate {
    fn from(datetime: NaiveDateTime) -> Self {
        RawDate::DateTime(datetime)
    }
}

impl From<&str> for RawDate {
    fn from(text: &str) -> Self {
        RawDate::Text(text.to_string())
    }
}

impl From<String> for RawDate {
    fn from(text: String) -> Self {
        RawDate::Text(text)
    }
}

impl<T: Into<RawDate>> From<Option<T>> for RawDate {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawDate::Absent, Into::into)
    }
}

impl From<&serde_json::Value> for RawDate {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawDate::Absent,
            serde_json::Value::String(s) => RawDate::Text(s.clone()),
            _ => RawDate::Unsupported,
        }
    }
}

impl From<serde_json::Value> for RawDate {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => RawDate::Text(s),
            other => RawDate::from(&other),
        }
    }
}

/// Why a raw value could not be turned into a date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// Absent, empty, or neither a string nor a date
    EmptyOrInvalidType,
    /// A string that matches no accepted format, or has an out-of-range month/day
    UnparseableString,
}

impl ParseFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseFailure::EmptyOrInvalidType => "empty_or_invalid_type",
            ParseFailure::UnparseableString => "unparseable_string",
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::EmptyOrInvalidType => write!(f, "date is empty or not a date/string value"),
            ParseFailure::UnparseableString => write!(f, "date string does not match YYYY-MM-DD or DD-MM-YYYY"),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Parse a raw value into a calendar date
pub fn parse<R: Into<RawDate>>(raw: R) -> Result<NaiveDate, ParseFailure> {
    match raw.into() {
        RawDate::Date(date) => Ok(date),
        RawDate::DateTime(datetime) => Ok(datetime.date()),
        RawDate::Text(text) => parse_text(&text),
        RawDate::Absent | RawDate::Unsupported => Err(ParseFailure::EmptyOrInvalidType),
    }
}

fn parse_text(text: &str) -> Result<NaiveDate, ParseFailure> {
    if text.is_empty() {
        return Err(ParseFailure::EmptyOrInvalidType);
    }

    // parse_from_str rejects trailing input, so the whole string must match
    DATE_FORMATS
        .iter()
        .filter(|format| has_four_digit_year(text, format))
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .ok_or(ParseFailure::UnparseableString)
}

/// chrono's `%Y` takes any digit count and a sign, so the year segment
/// (leading for ISO, trailing for day-first) is checked up front
fn has_four_digit_year(text: &str, format: &str) -> bool {
    let year = if format.starts_with("%Y") {
        text.split('-').next()
    } else {
        text.rsplit('-').next()
    };
    year.is_some_and(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()))
}

/// Render a date in the canonical `YYYY-MM-DD` form
pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
