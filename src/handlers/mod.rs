//! Command handlers for the chore-schedule CLI
//!
//! This module contains the implementation of all command handlers.
//! Each handler is in a separate file for better organization.

pub mod list;
pub mod occurrences;
pub mod reminders;
pub mod today;
