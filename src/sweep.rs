//! Whole-list derivations used by the list views and the reminder job

use crate::ordering::sort_by_due;
use crate::schedule::{Scheduled, is_due_on, is_overdue};
use chrono::NaiveDate;

/// The "Today" and "All" lists, both in list order
#[derive(Debug, Clone, PartialEq)]
pub struct DayPartition<'a, T> {
    pub today: Vec<&'a T>,
    pub all: Vec<&'a T>,
}

/// Split `items` into the entities relevant on `as_of` and the full list
pub fn partition<T: Scheduled>(items: &[T], as_of: NaiveDate) -> DayPartition<'_, T> {
    let mut today: Vec<&T> = items.iter().filter(|item| is_due_on(*item, as_of)).collect();
    let mut all: Vec<&T> = items.iter().collect();
    sort_by_due(&mut today, as_of);
    sort_by_due(&mut all, as_of);
    DayPartition { today, all }
}

/// Entities a daily reminder should go out for
///
/// Every entity that is not done and is due `today`, plus overdue entities
/// flagged `remind_until_done`. Input order is preserved.
pub fn reminders<T: Scheduled>(items: &[T], today: NaiveDate) -> Vec<&T> {
    items
        .iter()
        .filter(|item| !item.is_done())
        .filter(|item| {
            is_due_on(*item, today) || (item.remind_until_done() && is_overdue(*item, today))
        })
        .collect()
}
