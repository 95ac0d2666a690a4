//! Today handler for chore-schedule

use crate::ChoreHandler;
use crate::formatting;
use crate::sweep;

impl ChoreHandler {
    /// Lists the chores relevant today, in list order.
    ///
    /// Chores without any schedule are always listed.
    pub fn handle_today(&self, include_done: bool) -> String {
        let partition = sweep::partition(&self.chores, self.today);
        let mut chores = partition.today;
        if !include_done {
            chores.retain(|c| !c.done);
        }
        formatting::format_chores(&chores, self.today, false)
    }
}
