//! List ordering for scheduled entities
//!
//! Order: entities with an effective due date first, ascending by due date,
//! then by priority; undated entities last, by priority.
//!
//! A recurring entity's effective due date depends on the reference day, so
//! the comparator works on a [`SortKey`] computed once per entity with one
//! `as_of` for the whole sort.

use crate::schedule::{DueDate, Scheduled, effective_due_date};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Precomputed sort position of one entity
///
/// Field order is the comparison order. `None < Some` on `due` would put
/// undated entities first, so `undated` comes before it.
///
/// An untimed due date sorts as the start of its day, ahead of timed ones on
/// the same day. Falling back to priority only when one side lacks a time
/// would not be transitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    undated: bool,
    due: Option<DueDate>,
    priority: i32,
}

impl SortKey {
    pub fn new<E: Scheduled + ?Sized>(entity: &E, as_of: NaiveDate) -> Self {
        let due = effective_due_date(entity, as_of);
        Self {
            undated: due.is_none(),
            due,
            priority: entity.priority(),
        }
    }

    pub fn due(&self) -> Option<DueDate> {
        self.due
    }
}

/// Compare two entities as of `as_of`
pub fn compare<E: Scheduled + ?Sized>(a: &E, b: &E, as_of: NaiveDate) -> Ordering {
    SortKey::new(a, as_of).cmp(&SortKey::new(b, as_of))
}

/// Sort `items` in list order as of `as_of`
///
/// Each effective due date is computed exactly once. The sort is stable, so
/// entities with equal keys keep their input order.
pub fn sort_by_due<T: Scheduled>(items: &mut [T], as_of: NaiveDate) {
    items.sort_by_cached_key(|item| SortKey::new(item, as_of));
}
