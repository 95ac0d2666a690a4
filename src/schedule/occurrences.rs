//! Occurrence generation for recurrence rules
//!
//! [`RecurrenceRule::occurrences`] returns a fresh [`Occurrences`] iterator
//! every time it is called. The iterator borrows the rule and owns all of its
//! cursor state, so two calls with the same window always yield the same
//! days and never observe each other.

use super::rule::{Frequency, RecurrenceRule};
use chrono::{Datelike, Days, NaiveDate};

/// The Gregorian calendar repeats every 400 years. A MONTHLY or YEARLY rule
/// that finds nothing for a full cycle of periods never will.
const MAX_EMPTY_YEARS: u32 = 400;
const MAX_EMPTY_MONTHS: u32 = 400 * 12;

/// Query window for occurrence generation
///
/// Both bounds are inclusive; `None` leaves that side unbounded. The rule's
/// own `start`, `until` and `count` always apply on top of the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Window {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// A single calendar day
    pub fn day(day: NaiveDate) -> Self {
        Self {
            from: Some(day),
            to: Some(day),
        }
    }

    /// Everything on or after `from`
    pub fn starting(from: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}

/// Lazy, ascending sequence of the days a rule fires on within a window
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    rule: &'a RecurrenceRule,
    window: Window,
    /// Index of the next period (day, week block, month block, year block)
    period: u64,
    pending: std::vec::IntoIter<NaiveDate>,
    /// Occurrences consumed since `start`, including ones before the window
    emitted: u32,
    empty_run: u32,
    finished: bool,
}

impl RecurrenceRule {
    /// Days this rule fires on within `window`
    pub fn occurrences(&self, window: Window) -> Occurrences<'_> {
        Occurrences::new(self, window)
    }

    /// Whether the rule fires on `day`
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        self.occurrences(Window::day(day)).next().is_some()
    }

    /// Earliest occurrence on or after `day`
    pub fn next_on_or_after(&self, day: NaiveDate) -> Option<NaiveDate> {
        self.occurrences(Window::starting(day)).next()
    }
}

impl<'a> Occurrences<'a> {
    fn new(rule: &'a RecurrenceRule, window: Window) -> Self {
        Self {
            rule,
            window,
            period: first_period(rule, window.from),
            pending: Vec::new().into_iter(),
            emitted: 0,
            empty_run: 0,
            finished: false,
        }
    }

    /// True once `day` lies past every upper bound in effect
    fn past_end(&self, day: NaiveDate) -> bool {
        self.rule.until().is_some_and(|until| day > until)
            || self.window.to.is_some_and(|to| day > to)
    }

    /// Load the candidates of the next period into `pending`
    fn advance_period(&mut self) {
        let Some((anchor, candidates)) = period_candidates(self.rule, self.period) else {
            self.finished = true;
            return;
        };
        if self.past_end(anchor) {
            self.finished = true;
            return;
        }
        self.period += 1;

        if candidates.is_empty() {
            self.empty_run += 1;
            let limit = match self.rule.frequency() {
                Frequency::Yearly => MAX_EMPTY_YEARS,
                _ => MAX_EMPTY_MONTHS,
            };
            if self.empty_run >= limit {
                self.finished = true;
            }
        } else {
            self.empty_run = 0;
        }
        self.pending = candidates.into_iter();
    }
}

impl Iterator for Occurrences<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        loop {
            if self.finished {
                return None;
            }
            if self.rule.count().is_some_and(|count| self.emitted >= count) {
                self.finished = true;
                return None;
            }

            let Some(day) = self.pending.next() else {
                self.advance_period();
                continue;
            };

            // The week containing `start` may list weekdays before it
            if day < self.rule.start() {
                continue;
            }
            if self.past_end(day) {
                self.finished = true;
                return None;
            }

            self.emitted += 1;
            if self.window.from.is_some_and(|from| day < from) {
                continue;
            }
            return Some(day);
        }
    }
}

/// Monday of the week containing `day`, if chrono can represent it
fn week_start(day: NaiveDate) -> Option<NaiveDate> {
    day.checked_sub_days(Days::new(u64::from(day.weekday().num_days_from_monday())))
}

fn month_index(day: NaiveDate) -> i64 {
    i64::from(day.year()) * 12 + i64::from(day.month0())
}

/// First period worth generating for a window starting at `from`
///
/// With a `count` every occurrence since `start` consumes budget, so
/// generation has to begin at period zero. Without one, periods entirely
/// before `from` can be skipped.
fn first_period(rule: &RecurrenceRule, from: Option<NaiveDate>) -> u64 {
    let Some(from) = from else {
        return 0;
    };
    if rule.count().is_some() || from <= rule.start() {
        return 0;
    }

    let start = rule.start();
    let elapsed = match rule.frequency() {
        Frequency::Daily => (from - start).num_days(),
        Frequency::Weekly => match (week_start(from), week_start(start)) {
            (Some(from_week), Some(start_week)) => (from_week - start_week).num_days() / 7,
            _ => 0,
        },
        Frequency::Monthly => month_index(from) - month_index(start),
        Frequency::Yearly => i64::from(from.year() - start.year()),
    };
    u64::try_from(elapsed).unwrap_or(0) / u64::from(rule.interval())
}

/// The first day of period `period` and the candidate days inside it
///
/// Returns `None` when the period lies outside chrono's representable range.
/// Candidates are ascending; days that do not exist (Feb 30, Apr 31) are
/// skipped rather than clamped.
fn period_candidates(rule: &RecurrenceRule, period: u64) -> Option<(NaiveDate, Vec<NaiveDate>)> {
    let steps = period.checked_mul(u64::from(rule.interval()))?;
    let start = rule.start();

    match rule.frequency() {
        Frequency::Daily => {
            let day = start.checked_add_days(Days::new(steps))?;
            Some((day, vec![day]))
        }
        Frequency::Weekly => {
            let anchor = week_start(start)?.checked_add_days(Days::new(steps.checked_mul(7)?))?;
            let days = rule
                .weekdays()
                .iter()
                .filter_map(|wd| {
                    anchor.checked_add_days(Days::new(u64::from(wd.num_days_from_monday())))
                })
                .collect();
            Some((anchor, days))
        }
        Frequency::Monthly => {
            let index = month_index(start).checked_add(i64::try_from(steps).ok()?)?;
            let year = i32::try_from(index.div_euclid(12)).ok()?;
            let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
            let anchor = NaiveDate::from_ymd_opt(year, month, 1)?;
            let days = NaiveDate::from_ymd_opt(year, month, rule.month_day())
                .into_iter()
                .collect();
            Some((anchor, days))
        }
        Frequency::Yearly => {
            let year = start.year().checked_add(i32::try_from(steps).ok()?)?;
            let anchor = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let days = NaiveDate::from_ymd_opt(year, rule.month(), rule.month_day())
                .into_iter()
                .collect();
            Some((anchor, days))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_is_monday() {
        assert_eq!(week_start(day(2024, 1, 7)), Some(day(2024, 1, 1)));
        assert_eq!(week_start(day(2024, 1, 1)), Some(day(2024, 1, 1)));
        assert_eq!(week_start(day(2024, 1, 3)), Some(day(2024, 1, 1)));
    }

    #[test]
    fn test_week_start_outside_calendar_range() {
        // Earliest representable week runs Thursday..Sunday with no Monday
        let earliest = chrono::DateTime::from_timestamp_millis(-8_334_601_228_800_000)
            .unwrap()
            .date_naive();
        assert_eq!(earliest.weekday(), Weekday::Thu);
        assert_eq!(week_start(earliest), None);
        let rule = RecurrenceRule::builder(Frequency::Weekly, earliest)
            .build()
            .unwrap();
        assert_eq!(rule.occurrences(Window::unbounded()).next(), None);
        assert!(!rule.occurs_on(day(2025, 1, 1)));
    }

    #[test]
    fn test_first_period_skips_ahead_without_count() {
        let rule = RecurrenceRule::builder(Frequency::Daily, day(2000, 1, 1))
            .interval(3)
            .build()
            .unwrap();
        let period = first_period(&rule, Some(day(2000, 1, 11)));
        // Day 10 after start falls in period 3 (days 9..12)
        assert_eq!(period, 3);
        assert_eq!(rule.next_on_or_after(day(2000, 1, 11)), Some(day(2000, 1, 13)));
    }

    #[test]
    fn test_first_period_starts_at_zero_with_count() {
        let rule = RecurrenceRule::builder(Frequency::Daily, day(2000, 1, 1))
            .count(5)
            .build()
            .unwrap();
        assert_eq!(first_period(&rule, Some(day(2001, 1, 1))), 0);
    }

    #[test]
    fn test_weekly_first_block_skips_days_before_start() {
        // Start on a Wednesday; Monday of the same week must not appear
        let rule = RecurrenceRule::builder(Frequency::Weekly, day(2024, 1, 3))
            .weekdays([Weekday::Mon, Weekday::Fri])
            .build()
            .unwrap();
        let days: Vec<_> = rule.occurrences(Window::unbounded()).take(3).collect();
        assert_eq!(days, vec![day(2024, 1, 5), day(2024, 1, 8), day(2024, 1, 12)]);
    }

    #[test]
    fn test_impossible_yearly_date_terminates() {
        let rule = RecurrenceRule::builder(Frequency::Yearly, day(2024, 1, 1))
            .month(2)
            .month_day(30)
            .build()
            .unwrap();
        assert_eq!(rule.occurrences(Window::unbounded()).next(), None);
    }

    #[test]
    fn test_leap_day_with_non_leap_interval_terminates() {
        // 2001 + 4k is never a leap year
        let rule = RecurrenceRule::builder(Frequency::Yearly, day(2001, 1, 1))
            .interval(4)
            .month(2)
            .month_day(29)
            .build()
            .unwrap();
        assert_eq!(rule.next_on_or_after(day(2001, 1, 1)), None);
    }

    #[test]
    fn test_empty_months_before_until_stop_at_until() {
        let rule = RecurrenceRule::builder(Frequency::Monthly, day(2024, 1, 31))
            .until(day(2024, 2, 15))
            .build()
            .unwrap();
        let days: Vec<_> = rule.occurrences(Window::unbounded()).collect();
        assert_eq!(days, vec![day(2024, 1, 31)]);
    }

    #[test]
    fn test_iterator_is_clonable_and_independent() {
        let rule = RecurrenceRule::builder(Frequency::Daily, day(2024, 1, 1))
            .build()
            .unwrap();
        let mut first = rule.occurrences(Window::unbounded());
        first.next();
        let snapshot = first.clone();
        assert_eq!(first.next(), Some(day(2024, 1, 2)));
        assert_eq!(snapshot.take(1).collect::<Vec<_>>(), vec![day(2024, 1, 2)]);
    }
}
