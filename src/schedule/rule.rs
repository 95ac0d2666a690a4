use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error raised while constructing a recurrence rule
///
/// Once a [`RecurrenceRule`] exists it is valid; nothing downstream of
/// construction produces this error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRuleError {
    #[error("recurrence payload must be an object, found {0}")]
    NotAnObject(&'static str),

    #[error("recurring rule is missing a frequency")]
    MissingFrequency,

    #[error("unknown frequency '{0}'. Valid options are: DAILY, WEEKLY, MONTHLY, YEARLY")]
    UnknownFrequency(String),

    #[error("recurring rule is missing a start date")]
    MissingStart,

    #[error("invalid date '{value}' for {field}")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid value '{value}' for {field}")]
    InvalidField { field: &'static str, value: String },

    #[error("interval must be a positive integer, got {0}")]
    NonPositiveInterval(i64),

    #[error("count must be a positive integer, got {0}")]
    NonPositiveCount(i64),

    #[error("{field} is too large, got {value}")]
    TooLarge { field: &'static str, value: i64 },

    #[error("byMonthDay must be between 1 and 31, got {0}")]
    MonthDayOutOfRange(i64),

    #[error("byMonth must be between 1 and 12, got {0}")]
    MonthOutOfRange(i64),

    #[error("unknown weekday '{0}'")]
    UnknownWeekday(String),
}

/// Repeat unit of a recurrence rule
///
/// Serialized upper-case to match the stored JSON payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    /// Repeats every `interval` days
    Daily,
    /// Repeats on a set of weekdays every `interval` weeks
    Weekly,
    /// Repeats on one day of the month every `interval` months
    Monthly,
    /// Repeats on one month-day every `interval` years
    Yearly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = InvalidRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Ok(Frequency::Daily),
            "WEEKLY" => Ok(Frequency::Weekly),
            "MONTHLY" => Ok(Frequency::Monthly),
            "YEARLY" => Ok(Frequency::Yearly),
            _ => Err(InvalidRuleError::UnknownFrequency(s.to_string())),
        }
    }
}

/// Unvalidated pieces of a recurrence rule
///
/// This is the only way into a [`RecurrenceRule`]: fill in the fields
/// (directly or with the builder methods) and call [`RuleParts::build`].
/// Integer fields are signed so that out-of-range input reaches validation
/// instead of failing earlier in a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleParts {
    pub frequency: Option<Frequency>,
    pub interval: Option<i64>,
    pub start: Option<NaiveDate>,
    pub by_weekday: Vec<Weekday>,
    pub by_month_day: Option<i64>,
    pub by_month: Option<i64>,
    pub count: Option<i64>,
    pub until: Option<NaiveDate>,
}

impl RuleParts {
    pub fn interval(mut self, interval: i64) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.by_weekday = weekdays.into_iter().collect();
        self
    }

    pub fn month_day(mut self, day: i64) -> Self {
        self.by_month_day = Some(day);
        self
    }

    pub fn month(mut self, month: i64) -> Self {
        self.by_month = Some(month);
        self
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    pub fn build(self) -> Result<RecurrenceRule, InvalidRuleError> {
        RecurrenceRule::new(self)
    }
}

/// A validated, immutable recurrence rule
///
/// Invariants established by [`RecurrenceRule::new`]:
/// - `interval >= 1`, `count >= 1` when present
/// - `by_weekday` is only kept for WEEKLY rules, is never empty for them
///   (defaults to the weekday of `start`), and is deduplicated Monday-first
/// - `by_month_day` is in 1..=31 and only kept for MONTHLY/YEARLY
/// - `by_month` is in 1..=12 and only kept for YEARLY
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecurrenceRule {
    frequency: Frequency,
    interval: u32,
    start: NaiveDate,
    by_weekday: Vec<Weekday>,
    by_month_day: Option<u32>,
    by_month: Option<u32>,
    count: Option<u32>,
    until: Option<NaiveDate>,
}

impl RecurrenceRule {
    /// Start building a rule with the two required fields
    pub fn builder(frequency: Frequency, start: NaiveDate) -> RuleParts {
        RuleParts {
            frequency: Some(frequency),
            start: Some(start),
            ..RuleParts::default()
        }
    }

    /// Validate `parts` into a rule
    ///
    /// # Errors
    /// Returns [`InvalidRuleError`] for a missing frequency or start date,
    /// a non-positive or oversized interval or count, or an out-of-range
    /// month-day/month.
    pub fn new(parts: RuleParts) -> Result<Self, InvalidRuleError> {
        let frequency = parts.frequency.ok_or(InvalidRuleError::MissingFrequency)?;
        let start = parts.start.ok_or(InvalidRuleError::MissingStart)?;

        let interval = match parts.interval {
            None => 1,
            Some(n) if n <= 0 => return Err(InvalidRuleError::NonPositiveInterval(n)),
            Some(n) => bounded_u32("interval", n)?,
        };

        let count = match parts.count {
            None => None,
            Some(n) if n <= 0 => return Err(InvalidRuleError::NonPositiveCount(n)),
            Some(n) => Some(bounded_u32("count", n)?),
        };

        let by_month_day = parts
            .by_month_day
            .map(|d| match d {
                1..=31 => Ok(d as u32),
                _ => Err(InvalidRuleError::MonthDayOutOfRange(d)),
            })
            .transpose()?;

        let by_month = parts
            .by_month
            .map(|m| match m {
                1..=12 => Ok(m as u32),
                _ => Err(InvalidRuleError::MonthOutOfRange(m)),
            })
            .transpose()?;

        let by_weekday = if frequency == Frequency::Weekly {
            let mut days = parts.by_weekday;
            if days.is_empty() {
                days.push(start.weekday());
            }
            days.sort_by_key(|d| d.num_days_from_monday());
            days.dedup();
            days
        } else {
            Vec::new()
        };

        Ok(Self {
            frequency,
            interval,
            start,
            by_weekday,
            by_month_day: by_month_day
                .filter(|_| matches!(frequency, Frequency::Monthly | Frequency::Yearly)),
            by_month: by_month.filter(|_| frequency == Frequency::Yearly),
            count,
            until: parts.until,
        })
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// First possible occurrence
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Weekdays a WEEKLY rule fires on, Monday-first; empty for other frequencies
    pub fn weekdays(&self) -> &[Weekday] {
        &self.by_weekday
    }

    /// Explicit `byMonthDay`, if one was given
    pub fn by_month_day(&self) -> Option<u32> {
        self.by_month_day
    }

    /// Explicit `byMonth`, if one was given
    pub fn by_month(&self) -> Option<u32> {
        self.by_month
    }

    /// Day of month MONTHLY/YEARLY occurrences fall on
    pub fn month_day(&self) -> u32 {
        self.by_month_day.unwrap_or_else(|| self.start.day())
    }

    /// Month YEARLY occurrences fall in
    pub fn month(&self) -> u32 {
        self.by_month.unwrap_or_else(|| self.start.month())
    }

    pub fn count(&self) -> Option<u32> {
        self.count
    }

    /// Last day an occurrence may fall on (inclusive)
    pub fn until(&self) -> Option<NaiveDate> {
        self.until
    }

    /// Unvalidated form of this rule, for rebuilding with changes
    pub fn to_parts(&self) -> RuleParts {
        RuleParts {
            frequency: Some(self.frequency),
            interval: Some(i64::from(self.interval)),
            start: Some(self.start),
            by_weekday: self.by_weekday.clone(),
            by_month_day: self.by_month_day.map(i64::from),
            by_month: self.by_month.map(i64::from),
            count: self.count.map(i64::from),
            until: self.until,
        }
    }
}

fn bounded_u32(field: &'static str, value: i64) -> Result<u32, InvalidRuleError> {
    u32::try_from(value).map_err(|_| InvalidRuleError::TooLarge { field, value })
}
