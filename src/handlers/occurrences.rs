//! Occurrences handler for chore-schedule

use crate::ChoreHandler;
use crate::formatting;
use crate::schedule::{Schedule, Window};
use crate::validation;
use anyhow::{Result, bail};

impl ChoreHandler {
    /// Lists upcoming occurrences of one chore's schedule.
    ///
    /// `from` defaults to today. A fixed due date is listed if it falls in
    /// the window; an unscheduled chore has no occurrences.
    pub fn handle_occurrences(
        &self,
        id: &str,
        from: Option<String>,
        to: Option<String>,
        limit: usize,
    ) -> Result<String> {
        let id = validation::normalize_chore_id(id);
        let Some(chore) = self.chores.iter().find(|c| c.id == id) else {
            bail!(validation::format_unknown_chore_error(&id, &self.chores));
        };

        let from = match from {
            Some(ref date_str) => validation::parse_date_filter(date_str)?,
            None => self.today,
        };
        let to = to
            .as_deref()
            .map(validation::parse_date_filter)
            .transpose()?;
        if let Some(to) = to
            && to < from
        {
            bail!("End date {} is before start date {}", to, from);
        }
        let window = Window { from: Some(from), to };

        let days: Vec<String> = match &chore.schedule {
            Schedule::Recurring(rule) => rule
                .occurrences(window)
                .take(limit)
                .map(|day| format!("{} ({})", day, day.format("%A")))
                .collect(),
            Schedule::Fixed(due) => {
                let in_window = due.day() >= from && to.is_none_or(|to| due.day() <= to);
                if in_window {
                    vec![formatting::describe_due_date(due)]
                } else {
                    Vec::new()
                }
            }
            Schedule::Unscheduled => {
                return Ok(format!("Chore {} has no schedule", chore.id));
            }
        };

        let details = formatting::display_details(chore);
        let mut result = format!("[{}] {}: {}\n", chore.id, chore.title, details.display_date);
        if days.is_empty() {
            result.push_str("No occurrences in range\n");
        } else {
            for day in days {
                result.push_str(&format!("- {}\n", day));
            }
        }
        Ok(result)
    }
}
