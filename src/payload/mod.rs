//! Storage boundary for schedule payloads
//!
//! Chore rows carry their schedule as a `due_date` timestamp and a
//! `recurrence` JSON blob. This module is the only place those raw shapes are
//! looked at.
//!
//! ## Strict vs. lenient
//!
//! - [`rule_from_value`] is the validating factory. It accepts every field
//!   alias the stored payloads use, and fails loudly with
//!   [`InvalidRuleError`] on anything it cannot turn into a rule.
//! - [`recurrence_from_storage`], [`due_date_from_storage`] and
//!   [`schedule_from_storage`] sit on top of it for loading records. A
//!   corrupt payload there is logged and treated as absent, so one bad row
//!   cannot take down a whole list.

mod fields;

use crate::schedule::{DueDate, InvalidRuleError, RecurrenceRule, RuleParts, Schedule};
use fields::{
    COUNT_KEYS, DURATION_UNIT_KEYS, FREQUENCY_KEYS, INTERVAL_KEYS, MONTH_DAY_KEYS, MONTH_KEYS,
    START_KEYS, UNTIL_KEYS, WEEKDAY_KEYS, date_time_from_value, day_field, duration_unit_field,
    frequency_field, integer_field, lookup, single_integer_field, weekdays_field,
};
use serde_json::Value;
use std::borrow::Cow;

pub use fields::{parse_date_time, parse_weekday_token, value_kind, weekday_code};

/// Build a recurrence rule from a parsed JSON object
///
/// # Errors
/// [`InvalidRuleError`] when `value` is not an object, a field has a shape
/// no stored payload uses, or the resulting rule fails validation (missing
/// `start`, non-positive `interval`, out-of-range `byMonthDay`/`byMonth`).
pub fn rule_from_value(value: &Value) -> Result<RecurrenceRule, InvalidRuleError> {
    let Value::Object(fields) = value else {
        return Err(InvalidRuleError::NotAnObject(value_kind(value)));
    };

    let frequency = match lookup(fields, FREQUENCY_KEYS) {
        Some(v) => Some(frequency_field(v)?),
        None => lookup(fields, DURATION_UNIT_KEYS)
            .map(duration_unit_field)
            .transpose()?,
    };

    let parts = RuleParts {
        frequency,
        interval: lookup(fields, INTERVAL_KEYS)
            .map(|v| integer_field("interval", v))
            .transpose()?,
        start: lookup(fields, START_KEYS)
            .map(|v| day_field("start", v))
            .transpose()?,
        by_weekday: lookup(fields, WEEKDAY_KEYS)
            .map(weekdays_field)
            .transpose()?
            .unwrap_or_default(),
        by_month_day: lookup(fields, MONTH_DAY_KEYS)
            .map(|v| single_integer_field("byMonthDay", v))
            .transpose()?,
        by_month: lookup(fields, MONTH_KEYS)
            .map(|v| single_integer_field("byMonth", v))
            .transpose()?,
        count: lookup(fields, COUNT_KEYS)
            .map(|v| integer_field("count", v))
            .transpose()?,
        until: lookup(fields, UNTIL_KEYS)
            .map(|v| day_field("until", v))
            .transpose()?,
    };

    RecurrenceRule::new(parts)
}

/// Recurrence from a stored `recurrence` column
///
/// Accepts an already-decoded object or a JSON string holding one. Absent,
/// null and empty payloads mean "no recurrence". Anything unusable is logged
/// at warn level and also treated as "no recurrence".
pub fn recurrence_from_storage(value: Option<&Value>) -> Option<RecurrenceRule> {
    let value = value?;
    let payload: Cow<'_, Value> = match value {
        Value::Null => return None,
        Value::Object(_) => Cow::Borrowed(value),
        Value::String(text) if text.trim().is_empty() => return None,
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Null) => return None,
            Ok(decoded) => Cow::Owned(decoded),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unparsable recurrence payload");
                return None;
            }
        },
        other => {
            tracing::warn!(found = value_kind(other), "ignoring wrong-typed recurrence payload");
            return None;
        }
    };

    match rule_from_value(&payload) {
        Ok(rule) => Some(rule),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring invalid recurrence rule");
            None
        }
    }
}

/// Due date from a stored `due_date` column
///
/// Accepts the date formats of [`parse_date_time`] and millisecond
/// timestamps. Anything else is logged and treated as absent.
pub fn due_date_from_storage(value: Option<&Value>) -> Option<DueDate> {
    let value = value.filter(|v| !v.is_null())?;
    if value.as_str().is_some_and(|text| text.trim().is_empty()) {
        return None;
    }
    match date_time_from_value(value) {
        Some(at) => Some(DueDate::at(at)),
        None => {
            tracing::warn!(value = %value, "ignoring unparsable due date");
            None
        }
    }
}

/// Schedule of a stored record
///
/// Never fails. When both columns hold usable values the fixed due date wins.
pub fn schedule_from_storage(due_date: Option<&Value>, recurrence: Option<&Value>) -> Schedule {
    let due = due_date_from_storage(due_date);
    let rule = recurrence_from_storage(recurrence);
    if due.is_some() && rule.is_some() {
        tracing::debug!("record has both a due date and a recurrence; using the due date");
    }
    Schedule::new(due, rule)
}

/// Canonical JSON form of `rule`, as written back to storage
pub fn rule_to_value(rule: &RecurrenceRule) -> Value {
    // Serializing plain strings and integers into a Value cannot fail
    serde_json::to_value(rule).unwrap_or(Value::Null)
}
