//! Scheduling queries over entities
//!
//! Thin entity-level wrappers around [`Schedule`]. All of them take the
//! reference day explicitly.

use super::{DueDate, Scheduled};
use chrono::NaiveDate;

/// Whether `entity` is scheduled for `day`
///
/// Fixed due dates match on calendar day only. An entity with neither a due
/// date nor a recurrence counts as due every day.
pub fn is_due_on<E: Scheduled + ?Sized>(entity: &E, day: NaiveDate) -> bool {
    entity.schedule().is_due_on(day)
}

/// The due date to sort and display `entity` by
///
/// # Returns
/// The fixed due date regardless of `as_of`, the earliest occurrence on or
/// after `as_of` for a recurring entity (`None` once the rule is exhausted),
/// or `None` for an unscheduled entity.
pub fn effective_due_date<E: Scheduled + ?Sized>(entity: &E, as_of: NaiveDate) -> Option<DueDate> {
    entity.schedule().effective_due_date(as_of)
}

/// Whether `entity` is past due as of `as_of`
///
/// Done entities are never overdue.
pub fn is_overdue<E: Scheduled + ?Sized>(entity: &E, as_of: NaiveDate) -> bool {
    if entity.is_done() {
        return false;
    }
    effective_due_date(entity, as_of).is_some_and(|due| due.day() < as_of)
}
