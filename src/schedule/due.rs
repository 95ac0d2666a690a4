use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A one-off due date, optionally with a time of day
///
/// The time is carried for display and for ordering two timed due dates on
/// the same day. It never affects which calendar day the due date is on.
/// Midnight is stored as "no time".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DueDate {
    day: NaiveDate,
    time: Option<NaiveTime>,
}

impl DueDate {
    /// Due on `day`, no particular time
    pub fn on(day: NaiveDate) -> Self {
        Self { day, time: None }
    }

    /// Due at `at`
    pub fn at(at: NaiveDateTime) -> Self {
        let time = at.time();
        Self {
            day: at.date(),
            time: (time != NaiveTime::MIN).then_some(time),
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }
}

impl From<NaiveDate> for DueDate {
    fn from(day: NaiveDate) -> Self {
        Self::on(day)
    }
}

impl From<NaiveDateTime> for DueDate {
    fn from(at: NaiveDateTime) -> Self {
        Self::at(at)
    }
}

/// ISO 8601: `2025-03-15` or `2025-03-15T14:30:00`
impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time {
            None => write!(f, "{}", self.day.format("%Y-%m-%d")),
            Some(time) if time.nanosecond() == 0 => {
                write!(f, "{}T{}", self.day.format("%Y-%m-%d"), time.format("%H:%M:%S"))
            }
            Some(time) => write!(
                f,
                "{}T{}",
                self.day.format("%Y-%m-%d"),
                time.format("%H:%M:%S%.3f")
            ),
        }
    }
}

impl Serialize for DueDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        crate::payload::parse_date_time(&text)
            .map(DueDate::at)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid due date '{}'", text)))
    }
}
