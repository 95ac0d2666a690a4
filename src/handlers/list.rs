//! List handler for chore-schedule

use crate::ChoreHandler;
use crate::formatting;
use crate::sweep;

impl ChoreHandler {
    /// Handles list/filter operations - applies filters and formats results for display.
    pub fn handle_list(
        &self,
        keyword: Option<String>,
        exclude_done: bool,
        exclude_description: bool,
    ) -> String {
        let mut chores = sweep::partition(&self.chores, self.today).all;

        if exclude_done {
            chores.retain(|c| !c.done);
        }

        if let Some(ref keyword_filter) = keyword {
            formatting::apply_keyword_filter(&mut chores, keyword_filter);
        }

        formatting::format_chores(&chores, self.today, exclude_description)
    }
}
