//! Field-level parsing for raw recurrence payloads
//!
//! Stored payloads come from several generations of the chores frontend, so
//! the same concept appears under different keys and value shapes. Each
//! helper here accepts every known shape for one field and reports anything
//! else as an [`InvalidRuleError`].

use crate::schedule::{Frequency, InvalidRuleError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Weekday};
use serde_json::{Map, Value};

pub(crate) const FREQUENCY_KEYS: &[&str] = &["frequency", "freq", "type"];
pub(crate) const DURATION_UNIT_KEYS: &[&str] = &["durationUnit"];
pub(crate) const INTERVAL_KEYS: &[&str] = &["interval", "every"];
pub(crate) const START_KEYS: &[&str] = &["start", "dtstart"];
pub(crate) const WEEKDAY_KEYS: &[&str] = &["byWeekday", "byDayOfWeek", "byDay", "weekdays", "dayOfWeek"];
pub(crate) const MONTH_DAY_KEYS: &[&str] = &["byMonthDay", "dayOfMonth"];
pub(crate) const MONTH_KEYS: &[&str] = &["byMonth", "month"];
pub(crate) const COUNT_KEYS: &[&str] = &["count", "max"];
pub(crate) const UNTIL_KEYS: &[&str] = &["until", "end"];

/// First non-null value stored under any of `keys`
pub(crate) fn lookup<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

/// Short name of a JSON value's type, for log and error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a weekday token
///
/// Accepts RFC 5545 codes (`MO`), three-letter abbreviations (`Mon`) and
/// full names (`Monday`), in any case.
pub fn parse_weekday_token(token: &str) -> Option<Weekday> {
    match token.trim().to_ascii_lowercase().as_str() {
        "mo" | "mon" | "monday" => Some(Weekday::Mon),
        "tu" | "tue" | "tuesday" => Some(Weekday::Tue),
        "we" | "wed" | "wednesday" => Some(Weekday::Wed),
        "th" | "thu" | "thursday" => Some(Weekday::Thu),
        "fr" | "fri" | "friday" => Some(Weekday::Fri),
        "sa" | "sat" | "saturday" => Some(Weekday::Sat),
        "su" | "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// RFC 5545 two-letter code for `day`
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// Parse a stored date or date-time string
///
/// Accepts `YYYY-MM-DD`, local `YYYY-MM-DDTHH:MM[:SS[.fff]]` (a space may
/// replace the `T`), RFC 3339 and Postgres-style timestamps with an offset.
/// Offset timestamps keep their wall-clock reading; the offset is dropped.
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0);
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.naive_local());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(at) = DateTime::parse_from_str(text, format) {
            return Some(at.naive_local());
        }
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(at) = NaiveDateTime::parse_from_str(text, format) {
            return Some(at);
        }
    }
    None
}

/// Date-time from a string or a millisecond Unix timestamp (read as UTC)
pub(crate) fn date_time_from_value(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(text) => parse_date_time(text),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|at| at.naive_utc()),
        _ => None,
    }
}

pub(crate) fn day_field(field: &'static str, value: &Value) -> Result<NaiveDate, InvalidRuleError> {
    date_time_from_value(value)
        .map(|at| at.date())
        .ok_or_else(|| InvalidRuleError::InvalidDate {
            field,
            value: display(value),
        })
}

pub(crate) fn frequency_field(value: &Value) -> Result<Frequency, InvalidRuleError> {
    match value {
        Value::String(text) => text.parse(),
        other => Err(InvalidRuleError::InvalidField {
            field: "frequency",
            value: display(other),
        }),
    }
}

/// Frequency from a dayspan-style `durationUnit`
pub(crate) fn duration_unit_field(value: &Value) -> Result<Frequency, InvalidRuleError> {
    let unit = value.as_str().map(|s| s.trim().to_ascii_lowercase());
    match unit.as_deref() {
        Some("day" | "days") => Ok(Frequency::Daily),
        Some("week" | "weeks") => Ok(Frequency::Weekly),
        Some("month" | "months") => Ok(Frequency::Monthly),
        Some("year" | "years") => Ok(Frequency::Yearly),
        _ => Err(InvalidRuleError::InvalidField {
            field: "durationUnit",
            value: display(value),
        }),
    }
}

/// Integer from a JSON number (whole floats included) or a numeric string
pub(crate) fn integer_field(field: &'static str, value: &Value) -> Result<i64, InvalidRuleError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
                .map(|f| f as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| InvalidRuleError::InvalidField {
        field,
        value: display(value),
    })
}

/// Integer that may also arrive wrapped in a one-element array
pub(crate) fn single_integer_field(
    field: &'static str,
    value: &Value,
) -> Result<i64, InvalidRuleError> {
    match value {
        Value::Array(items) => match items.as_slice() {
            [one] => integer_field(field, one),
            _ => Err(InvalidRuleError::InvalidField {
                field,
                value: display(value),
            }),
        },
        other => integer_field(field, other),
    }
}

/// Weekday set from a token, a comma-separated list, or an array
///
/// Numbers are read with 0 = Sunday.
pub(crate) fn weekdays_field(value: &Value) -> Result<Vec<Weekday>, InvalidRuleError> {
    match value {
        Value::Array(items) => items.iter().map(weekday_item).collect(),
        Value::String(text) => text
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                parse_weekday_token(token)
                    .ok_or_else(|| InvalidRuleError::UnknownWeekday(token.to_string()))
            })
            .collect(),
        other => weekday_item(other).map(|day| vec![day]),
    }
}

fn weekday_item(value: &Value) -> Result<Weekday, InvalidRuleError> {
    let parsed = match value {
        Value::String(token) => parse_weekday_token(token),
        Value::Number(n) => n.as_u64().and_then(weekday_from_sunday_index),
        _ => None,
    };
    parsed.ok_or_else(|| InvalidRuleError::UnknownWeekday(display(value)))
}

fn weekday_from_sunday_index(index: u64) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Strings without their JSON quotes, everything else as JSON
fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
