//! Validation helper functions for chore-schedule commands
//!
//! This module contains validation logic for date arguments and chore
//! lookups.

use crate::chore::Chore;
use anyhow::{Result, anyhow};
use chrono::NaiveDate;

/// Parse and validate a date argument
///
/// # Arguments
/// * `date_str` - Date string in YYYY-MM-DD format
///
/// # Returns
/// Result containing parsed NaiveDate or error
pub fn parse_date_filter(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        anyhow!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        )
    })
}

/// Format an error message for an unknown chore ID with the available IDs
///
/// # Arguments
/// * `chore_id` - The ID that was not found
/// * `chores` - The loaded chores
///
/// # Returns
/// A formatted error message including the list of available IDs
pub fn format_unknown_chore_error(chore_id: &str, chores: &[Chore]) -> String {
    if chores.is_empty() {
        format!(
            "Chore '{}' does not exist. No chores have been loaded.",
            chore_id
        )
    } else {
        let ids: Vec<&str> = chores.iter().map(|c| c.id.as_str()).collect();
        format!(
            "Chore '{}' does not exist.\nAvailable chores: {}",
            chore_id,
            ids.join(", ")
        )
    }
}

/// Normalize a chore ID by trimming surrounding whitespace
pub fn normalize_chore_id(chore_id: &str) -> String {
    chore_id.trim().to_string()
}
