//! Serialization and deserialization implementations for RecurrenceRule
//!
//! Rules serialize to the canonical camelCase JSON object stored alongside a
//! chore. Deserialization goes through the same strict factory as every other
//! raw payload, so a rule can only come into existence validated.

use super::rule::{Frequency, RecurrenceRule};
use crate::payload::{self, weekday_code};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RuleRecord {
    frequency: Frequency,
    interval: u32,
    start: NaiveDate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    by_weekday: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    by_month_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    by_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    until: Option<NaiveDate>,
}

impl Serialize for RecurrenceRule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RuleRecord {
            frequency: self.frequency(),
            interval: self.interval(),
            start: self.start(),
            by_weekday: self.weekdays().iter().map(|d| weekday_code(*d)).collect(),
            by_month_day: self.by_month_day(),
            by_month: self.by_month(),
            count: self.count(),
            until: self.until(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RecurrenceRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        payload::rule_from_value(&value).map_err(serde::de::Error::custom)
    }
}
