//! Chore records
//!
//! A chore as stored by the chores API: an id, a title, a priority, a done
//! flag and a schedule. Deserialization goes through the lenient storage
//! boundary, so a row with a corrupt `due_date` or `recurrence` still loads
//! (as an unscheduled chore).

use crate::payload;
use crate::schedule::{DueDate, RecurrenceRule, Schedule, Scheduled};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A household chore
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chore {
    /// Unique identifier (UUID in the chores database)
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Lower value means higher priority; missing priorities load as 0
    pub priority: i32,
    pub done: bool,
    /// Keep sending reminders while the chore is overdue
    pub remind_until_done: bool,
    pub schedule: Schedule,
}

impl Chore {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due: impl Into<DueDate>) -> Self {
        self.schedule = Schedule::Fixed(due.into());
        self
    }

    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.schedule = Schedule::Recurring(rule);
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    pub fn with_remind_until_done(mut self, remind: bool) -> Self {
        self.remind_until_done = remind;
        self
    }
}

impl Scheduled for Chore {
    fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn remind_until_done(&self) -> bool {
        self.remind_until_done
    }
}

/// Raw row shape; accepts both the database's snake_case columns and the
/// frontend's camelCase fields
#[derive(Deserialize)]
struct ChoreRow {
    #[serde(default, deserialize_with = "id_from_value")]
    id: String,
    #[serde(default, alias = "name")]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<i32>,
    #[serde(default)]
    done: Option<bool>,
    #[serde(default, alias = "remindUntilDone")]
    remind_until_done: Option<bool>,
    #[serde(default, alias = "dueDate")]
    due_date: Option<Value>,
    #[serde(default)]
    recurrence: Option<Value>,
}

/// Ids are UUID strings in the database but plain numbers in older exports
fn id_from_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl<'de> Deserialize<'de> for Chore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let row = ChoreRow::deserialize(deserializer)?;
        let schedule = payload::schedule_from_storage(row.due_date.as_ref(), row.recurrence.as_ref());
        Ok(Chore {
            id: row.id,
            title: row.title,
            description: row.description,
            priority: row.priority.unwrap_or(0),
            done: row.done.unwrap_or(false),
            remind_until_done: row.remind_until_done.unwrap_or(false),
            schedule,
        })
    }
}

#[derive(Serialize)]
struct ChoreRowRef<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    priority: i32,
    done: bool,
    remind_until_done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<&'a DueDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurrence: Option<&'a RecurrenceRule>,
}

impl Serialize for Chore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ChoreRowRef {
            id: &self.id,
            title: &self.title,
            description: self.description.as_deref(),
            priority: self.priority,
            done: self.done,
            remind_until_done: self.remind_until_done,
            due_date: self.schedule.due_date(),
            recurrence: self.schedule.recurrence(),
        }
        .serialize(serializer)
    }
}
