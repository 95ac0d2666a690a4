//! Formatting helper functions for chore schedules
//!
//! Human-readable schedule text for list views and the CLI. Nothing here is
//! used for comparisons, and nothing here fails: unusable input renders a
//! fallback string.

use crate::chore::Chore;
use crate::payload;
use crate::schedule::{DueDate, Frequency, RecurrenceRule, Schedule, Scheduled, effective_due_date, is_overdue};
use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde_json::Value;
use std::borrow::Cow;
use strsim::jaro_winkler;

/// Shown for recurrence payloads the rule factory rejects
pub const INVALID_RECURRENCE: &str = "Invalid recurrence";

/// Shown for entities with neither a due date nor a recurrence
pub const NO_SPECIFIC_DATE: &str = "No specific date";

/// Describe a recurrence rule, e.g. "Every 2 weeks on Monday, Wednesday until 12/31/2025"
pub fn describe_rule(rule: &RecurrenceRule) -> String {
    let interval = rule.interval();
    let mut text = match rule.frequency() {
        Frequency::Daily => every(interval, "day"),
        Frequency::Weekly => {
            let mut days = rule.weekdays().to_vec();
            days.sort_by_key(|d| d.num_days_from_sunday());
            let names: Vec<&str> = days.into_iter().map(weekday_name).collect();
            format!("{} on {}", every(interval, "week"), names.join(", "))
        }
        Frequency::Monthly => format!(
            "{} on the {}",
            every(interval, "month"),
            ordinal(rule.month_day())
        ),
        Frequency::Yearly => format!(
            "{} in {} on the {}",
            every(interval, "year"),
            month_name(rule.month()),
            ordinal(rule.month_day())
        ),
    };

    if let Some(count) = rule.count() {
        let noun = if count == 1 { "occurrence" } else { "occurrences" };
        text.push_str(&format!(" for {} {}", count, noun));
    } else if let Some(until) = rule.until() {
        text.push_str(&format!(" until {}", short_date(until)));
    }
    text
}

/// Describe a fixed due date as `M/D/YYYY`, plus a 12-hour time when it has one
pub fn describe_due_date(due: &DueDate) -> String {
    let mut text = short_date(due.day());
    if let Some(time) = due.time() {
        text.push(' ');
        text.push_str(&time.format("%-I:%M %p").to_string());
    }
    text
}

/// Describe a raw stored recurrence payload
///
/// # Returns
/// An empty string for an absent payload, the rule description for a valid
/// one, and [`INVALID_RECURRENCE`] for anything else.
pub fn schedule_display_string(recurrence: Option<&Value>) -> String {
    let Some(value) = recurrence.filter(|v| !v.is_null()) else {
        return String::new();
    };
    let decoded: Option<Cow<'_, Value>> = match value {
        Value::String(text) => serde_json::from_str(text).ok().map(Cow::Owned),
        other => Some(Cow::Borrowed(other)),
    };
    decoded
        .and_then(|v| payload::rule_from_value(&v).ok())
        .map(|rule| describe_rule(&rule))
        .unwrap_or_else(|| INVALID_RECURRENCE.to_string())
}

/// Text shown next to a chore in a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDetails {
    /// Date text: the rule description, the due date, or "No specific date"
    pub display_date: String,
    /// Tooltip for the recurrence icon; only set for recurring entities
    pub recurrence_title: Option<String>,
}

/// Display text for an entity's schedule
pub fn display_details<E: Scheduled + ?Sized>(entity: &E) -> DisplayDetails {
    match entity.schedule() {
        Schedule::Recurring(rule) => {
            let text = describe_rule(rule);
            DisplayDetails {
                display_date: text.clone(),
                recurrence_title: Some(text),
            }
        }
        Schedule::Fixed(due) => DisplayDetails {
            display_date: describe_due_date(due),
            recurrence_title: None,
        },
        Schedule::Unscheduled => DisplayDetails {
            display_date: NO_SPECIFIC_DATE.to_string(),
            recurrence_title: None,
        },
    }
}

/// Minimum Jaro-Winkler similarity for a keyword to match a word with a typo
pub const KEYWORD_SIMILARITY: f64 = 0.85;

/// Apply keyword filtering (case-insensitive search in id, title, and description)
///
/// A chore matches when the keyword is a substring of one of those fields, or
/// when every word of the keyword is close to some word of the title or
/// description (similarity >= [`KEYWORD_SIMILARITY`]).
///
/// # Arguments
/// * `chores` - Chores to filter in place
/// * `keyword` - Keyword to search for (case-insensitive)
pub fn apply_keyword_filter(chores: &mut Vec<&Chore>, keyword: &str) {
    let keyword_lower = keyword.trim().to_lowercase();
    if keyword_lower.is_empty() {
        return;
    }
    let keyword_words: Vec<&str> = keyword_lower.split_whitespace().collect();

    chores.retain(|chore| {
        let id_matches = chore.id.to_lowercase().contains(&keyword_lower);
        let title_lower = chore.title.to_lowercase();
        let description_lower = chore.description.as_deref().map(str::to_lowercase);
        let substring_matches = title_lower.contains(&keyword_lower)
            || description_lower
                .as_ref()
                .is_some_and(|d| d.contains(&keyword_lower));
        if id_matches || substring_matches {
            return true;
        }

        let words: Vec<&str> = title_lower
            .split_whitespace()
            .chain(description_lower.iter().flat_map(|d| d.split_whitespace()))
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| !w.is_empty())
            .collect();
        keyword_words.iter().all(|kw| {
            words
                .iter()
                .any(|word| jaro_winkler(kw, word) >= KEYWORD_SIMILARITY)
        })
    });
}

/// Format chores into a display string
///
/// # Arguments
/// * `chores` - Chores in the order they should be listed
/// * `as_of` - Reference day for next-due dates and overdue markers
/// * `exclude_description` - Whether to leave descriptions out
pub fn format_chores(chores: &[&Chore], as_of: NaiveDate, exclude_description: bool) -> String {
    if chores.is_empty() {
        return "No chores found".to_string();
    }

    let mut result = format!("Found {} chore(s):\n\n", chores.len());
    for chore in chores {
        let mut flags = Vec::new();
        if chore.done {
            flags.push("done");
        }
        if is_overdue(*chore, as_of) {
            flags.push("overdue");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };

        result.push_str(&format!(
            "- [{}] {} (priority: {}){}\n",
            chore.id, chore.title, chore.priority, flags
        ));

        if !exclude_description && let Some(ref d) = chore.description {
            result.push_str(&format!("  Description: {}\n", d));
        }
        let details = display_details(*chore);
        result.push_str(&format!("  Schedule: {}\n", details.display_date));
        if chore.schedule.is_recurring() {
            match effective_due_date(*chore, as_of) {
                Some(next) => {
                    result.push_str(&format!("  Next due: {}\n", describe_due_date(&next)))
                }
                None => result.push_str("  Next due: none (rule exhausted)\n"),
            }
        }
    }

    result
}

fn every(interval: u32, unit: &str) -> String {
    if interval == 1 {
        format!("Every {}", unit)
    } else {
        format!("Every {} {}s", interval, unit)
    }
}

fn short_date(day: NaiveDate) -> String {
    format!("{}/{}/{}", day.month(), day.day(), day.year())
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("?", |m| m.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_suffixes() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (31, "31st"),
        ];
        for (day, expected) in cases {
            assert_eq!(ordinal(day), expected);
        }
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
    }
}
