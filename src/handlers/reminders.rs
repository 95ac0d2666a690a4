//! Reminders handler for chore-schedule

use crate::ChoreHandler;
use crate::schedule::is_overdue;
use crate::sweep;

impl ChoreHandler {
    /// Selects the chores the daily reminder sweep would notify about.
    ///
    /// One line per chore; delivery is left to the caller.
    pub fn handle_reminders(&self) -> String {
        let due = sweep::reminders(&self.chores, self.today);
        if due.is_empty() {
            return format!("No reminders for {}", self.today);
        }

        let mut result = format!("{} reminder(s) for {}:\n", due.len(), self.today);
        for chore in due {
            let reason = if is_overdue(chore, self.today) {
                "overdue"
            } else {
                "due today"
            };
            result.push_str(&format!("- [{}] {} ({})\n", chore.id, chore.title, reason));
        }
        result
    }
}
