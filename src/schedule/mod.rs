//! Recurrence and due-date engine
//!
//! This module contains the scheduling model and the pure queries built on it.
//! It is split into submodules:
//! - `rule`: validated recurrence rules and their construction errors
//! - `due`: one-off due dates
//! - `occurrences`: lazy occurrence generation over a query window
//! - `queries`: "is due on", effective due date and overdue checks
//! - `serde_impl`: canonical JSON form of a recurrence rule
//!
//! Every function here is pure. "Today" is always passed in by the caller.

mod due;
mod occurrences;
mod queries;
mod rule;
mod serde_impl;

pub use due::DueDate;
pub use occurrences::{Occurrences, Window};
pub use queries::{effective_due_date, is_due_on, is_overdue};
pub use rule::{Frequency, InvalidRuleError, RecurrenceRule, RuleParts};

use chrono::{Local, NaiveDate};

/// Get the current date in local timezone
///
/// Call this once per logical operation and pass the result down.
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// When an entity is due
///
/// This is the only shape the queries accept. Raw payloads are turned into
/// one of these at the storage boundary (see [`crate::payload`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Schedule {
    /// No due date and no recurrence; relevant every day
    #[default]
    Unscheduled,
    /// A one-off due date
    Fixed(DueDate),
    /// A repeating rule
    Recurring(RecurrenceRule),
}

impl Schedule {
    /// Combine the two optional schedule fields of a record
    ///
    /// A fixed due date is a concrete override and wins over a recurrence.
    pub fn new(due_date: Option<DueDate>, recurrence: Option<RecurrenceRule>) -> Self {
        match (due_date, recurrence) {
            (Some(due), _) => Schedule::Fixed(due),
            (None, Some(rule)) => Schedule::Recurring(rule),
            (None, None) => Schedule::Unscheduled,
        }
    }

    pub fn due_date(&self) -> Option<&DueDate> {
        match self {
            Schedule::Fixed(due) => Some(due),
            _ => None,
        }
    }

    pub fn recurrence(&self) -> Option<&RecurrenceRule> {
        match self {
            Schedule::Recurring(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self, Schedule::Recurring(_))
    }

    /// Whether this schedule makes its entity relevant on `day`
    ///
    /// Unscheduled entities are relevant on every day.
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        match self {
            Schedule::Fixed(due) => due.day() == day,
            Schedule::Recurring(rule) => rule.occurs_on(day),
            Schedule::Unscheduled => true,
        }
    }

    /// The fixed due date, or the first occurrence on or after `as_of`
    pub fn effective_due_date(&self, as_of: NaiveDate) -> Option<DueDate> {
        match self {
            Schedule::Fixed(due) => Some(*due),
            Schedule::Recurring(rule) => rule.next_on_or_after(as_of).map(DueDate::on),
            Schedule::Unscheduled => None,
        }
    }
}

/// The engine's view of a schedulable record
///
/// Implemented by [`crate::Chore`]; any caller-side record type can
/// implement it to use the queries, the comparator and the sweeps.
pub trait Scheduled {
    fn schedule(&self) -> &Schedule;

    /// Lower value means higher priority
    fn priority(&self) -> i32;

    fn is_done(&self) -> bool;

    /// Keep reminding about this entity while it is overdue
    fn remind_until_done(&self) -> bool {
        false
    }
}

impl<T: Scheduled + ?Sized> Scheduled for &T {
    fn schedule(&self) -> &Schedule {
        (**self).schedule()
    }

    fn priority(&self) -> i32 {
        (**self).priority()
    }

    fn is_done(&self) -> bool {
        (**self).is_done()
    }

    fn remind_until_done(&self) -> bool {
        (**self).remind_until_done()
    }
}
