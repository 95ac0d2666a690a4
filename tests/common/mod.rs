//! Common test utilities for integration tests
#![allow(dead_code)]

use chore_schedule::{Chore, DueDate, Frequency, RecurrenceRule};
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use tempfile::NamedTempFile;

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(year: i32, month: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
    day(year, month, d).and_hms_opt(hour, minute, 0).unwrap()
}

/// Weekly rule with interval 1 on the given weekdays
pub fn weekly(start: NaiveDate, weekdays: &[Weekday]) -> RecurrenceRule {
    RecurrenceRule::builder(Frequency::Weekly, start)
        .weekdays(weekdays.iter().copied())
        .build()
        .unwrap()
}

pub fn daily(start: NaiveDate) -> RecurrenceRule {
    RecurrenceRule::builder(Frequency::Daily, start).build().unwrap()
}

/// Create a chore with no schedule
pub fn unscheduled_chore(id: &str, priority: i32) -> Chore {
    Chore::new(id, format!("Chore {}", id)).with_priority(priority)
}

/// Create a chore with a fixed due date
pub fn fixed_chore(id: &str, priority: i32, due: impl Into<DueDate>) -> Chore {
    unscheduled_chore(id, priority).with_due_date(due)
}

/// Create a chore with a recurrence rule
pub fn recurring_chore(id: &str, priority: i32, rule: RecurrenceRule) -> Chore {
    unscheduled_chore(id, priority).with_recurrence(rule)
}

pub fn ids<'a>(chores: &[&'a Chore]) -> Vec<&'a str> {
    chores.iter().map(|c| c.id.as_str()).collect()
}

/// Write `content` to a temporary file with the given extension
pub fn temp_chores_file(suffix: &str, content: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .prefix("chores-test-")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    std::fs::write(file.path(), content).unwrap();
    file
}
