//! Chore Schedule Library
//!
//! This library provides the recurrence and due-date engine behind a
//! household chores tracker. Given a chore's one-off due date or recurrence
//! rule it answers whether the chore is due on a day, when it is next due,
//! how to describe its schedule, and where it goes in a sorted list.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **Command Layer**: `ChoreHandler` - Runs CLI commands over a loaded chore list
//! - **Domain Layer**: `schedule` module - Rule model, occurrence generation and queries
//! - **Boundary Layer**: `payload` and `storage` modules - Raw stored payloads and chore files
//!
//! Every engine function is pure and takes the reference day as a parameter.
//!
//! # Example
//!
//! ```
//! use chore_schedule::{Frequency, RecurrenceRule, Window};
//! use chrono::{NaiveDate, Weekday};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let rule = RecurrenceRule::builder(Frequency::Weekly, start)
//!     .interval(2)
//!     .weekdays([Weekday::Tue])
//!     .build()
//!     .unwrap();
//!
//! let to = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let days: Vec<_> = rule.occurrences(Window::between(start, to)).collect();
//! assert_eq!(days.len(), 3);
//! ```

mod chore;
pub mod formatting;
mod handlers;
pub mod ordering;
pub mod payload;
pub mod schedule;
mod storage;
pub mod sweep;
pub mod validation;

use anyhow::Result;
use chrono::NaiveDate;
use std::path::Path;

// Re-export commonly used types
pub use chore::Chore;
pub use ordering::{SortKey, compare, sort_by_due};
pub use schedule::{
    DueDate, Frequency, InvalidRuleError, Occurrences, RecurrenceRule, RuleParts, Schedule,
    Scheduled, Window, effective_due_date, is_due_on, is_overdue, local_date_today,
};
pub use storage::{ChoreList, Storage};

/// Command handler for the chore-schedule CLI
///
/// Holds one loaded chore list and the day treated as "today". The day is
/// fixed at construction so every command sees the same reference day.
pub struct ChoreHandler {
    pub(crate) chores: Vec<Chore>,
    pub(crate) today: NaiveDate,
}

impl ChoreHandler {
    /// Create a handler over an already-loaded chore list
    pub fn new(chores: Vec<Chore>, today: NaiveDate) -> Self {
        Self { chores, today }
    }

    /// Load chores from `storage_path` (JSON or TOML)
    ///
    /// # Arguments
    /// * `storage_path` - Path to the chores file; a missing file is an empty list
    /// * `today` - Reference day for every command run through this handler
    ///
    /// # Example
    /// ```no_run
    /// # use chore_schedule::{ChoreHandler, local_date_today};
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = ChoreHandler::open("chores.toml", local_date_today())?;
    /// println!("{}", handler.handle_today(false));
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(storage_path: impl AsRef<Path>, today: NaiveDate) -> Result<Self> {
        let chores = Storage::new(storage_path).load()?;
        Ok(Self::new(chores, today))
    }

    pub fn chores(&self) -> &[Chore] {
        &self.chores
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}
