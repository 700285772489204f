//! Budget period boundaries for weekly and monthly cycles.
//!
//! Windows are calendar-accurate: monthly periods follow real month lengths,
//! weekly periods always span seven calendar days.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use cadence_domain::{Budget, BudgetPeriodType, CycleDefaults, PreconditionPolicy};

use crate::{
    calendar::{add_months, ceil_days, end_of_day, start_of_day, truncate_to_millis},
    validation::resolve_with_policy,
    CoreError,
};

const MAX_WINDOWS: usize = 520;

/// Weekday a weekly budget resets on, 0 = Sunday through 6 = Saturday.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekStartDay(u8);

impl WeekStartDay {
    pub fn new(day: u8) -> Result<Self, CoreError> {
        if day <= 6 {
            Ok(Self(day))
        } else {
            Err(CoreError::InvalidWeekStartDay(day))
        }
    }

    pub fn clamped(day: u8) -> Self {
        Self(day.min(6))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn weekday(self) -> Weekday {
        match self.0 {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }
}

impl TryFrom<u8> for WeekStartDay {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WeekStartDay> for u8 {
    fn from(value: WeekStartDay) -> Self {
        value.0
    }
}

impl From<Weekday> for WeekStartDay {
    fn from(value: Weekday) -> Self {
        Self(value.num_days_from_sunday() as u8)
    }
}

/// Day of month a monthly budget resets on, 1 through 28.
///
/// Capped at 28 so every month contains the start day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MonthStartDay(u8);

impl MonthStartDay {
    pub fn new(day: u8) -> Result<Self, CoreError> {
        if (1..=28).contains(&day) {
            Ok(Self(day))
        } else {
            Err(CoreError::InvalidMonthStartDay(day))
        }
    }

    pub fn clamped(day: u8) -> Self {
        Self(day.clamp(1, 28))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for MonthStartDay {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonthStartDay> for u8 {
    fn from(value: MonthStartDay) -> Self {
        value.0
    }
}

/// Validated cycle configuration of a budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "period_type", rename_all = "lowercase")]
pub enum BudgetPeriodConfig {
    Weekly { week_start_day: WeekStartDay },
    Monthly { month_start_day: MonthStartDay },
}

impl BudgetPeriodConfig {
    pub fn weekly(week_start_day: u8) -> Result<Self, CoreError> {
        Ok(Self::Weekly {
            week_start_day: WeekStartDay::new(week_start_day)?,
        })
    }

    pub fn monthly(month_start_day: u8) -> Result<Self, CoreError> {
        Ok(Self::Monthly {
            month_start_day: MonthStartDay::new(month_start_day)?,
        })
    }

    /// Resolves the raw start-day fields of a budget entity.
    ///
    /// The start day matching `period_type` is used; a missing one falls back
    /// to `defaults`. Out-of-range values are handled according to `policy`.
    pub fn from_budget(
        budget: &Budget,
        policy: PreconditionPolicy,
        defaults: CycleDefaults,
    ) -> Result<Self, CoreError> {
        match budget.period_type {
            BudgetPeriodType::Weekly => {
                let raw = budget.week_start_day.unwrap_or(defaults.week_start_day);
                let week_start_day = resolve_with_policy(
                    raw,
                    policy,
                    budget.id,
                    "week_start_day",
                    WeekStartDay::new,
                    WeekStartDay::clamped,
                )?;
                Ok(Self::Weekly { week_start_day })
            }
            BudgetPeriodType::Monthly => {
                let raw = budget.month_start_day.unwrap_or(defaults.month_start_day);
                let month_start_day = resolve_with_policy(
                    raw,
                    policy,
                    budget.id,
                    "month_start_day",
                    MonthStartDay::new,
                    MonthStartDay::clamped,
                )?;
                Ok(Self::Monthly { month_start_day })
            }
        }
    }

    pub fn period_type(&self) -> BudgetPeriodType {
        match self {
            Self::Weekly { .. } => BudgetPeriodType::Weekly,
            Self::Monthly { .. } => BudgetPeriodType::Monthly,
        }
    }
}

impl fmt::Display for BudgetPeriodConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly { week_start_day } => {
                write!(f, "Weekly from {}", week_start_day.weekday())
            }
            Self::Monthly { month_start_day } => {
                write!(f, "Monthly from day {}", month_start_day.get())
            }
        }
    }
}

/// Inclusive start/end instants of one budget period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodBounds {
    pub period_start: NaiveDateTime,
    pub period_end: NaiveDateTime,
}

impl PeriodBounds {
    fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            period_start: start_of_day(start),
            period_end: end_of_day(end),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.period_start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.period_end.date()
    }

    /// First day of the following period.
    pub fn reset_date(&self) -> NaiveDate {
        self.end_date() + Duration::days(1)
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.period_start && instant <= self.period_end
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Number of calendar days covered, both ends included.
    pub fn length_days(&self) -> i64 {
        (self.end_date() - self.start_date()).num_days() + 1
    }
}

/// The active period as observed at a given `now`.
///
/// Recomputed on every call; stale as soon as `now` crosses `period_end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub period_start: NaiveDateTime,
    pub period_end: NaiveDateTime,
    /// Whole days until the reset, counting today. Always at least 1.
    pub days_until_reset: i64,
}

impl PeriodWindow {
    pub fn bounds(&self) -> PeriodBounds {
        PeriodBounds {
            period_start: self.period_start,
            period_end: self.period_end,
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.bounds().contains(instant)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.bounds().contains_date(date)
    }

    pub fn reset_date(&self) -> NaiveDate {
        self.bounds().reset_date()
    }

    pub fn length_days(&self) -> i64 {
        self.bounds().length_days()
    }
}

/// Stateless period computations.
pub struct PeriodCalculator;

impl PeriodCalculator {
    /// Computes the period containing `now` and the days left until it resets.
    pub fn compute_window(config: &BudgetPeriodConfig, now: NaiveDateTime) -> PeriodWindow {
        let now = truncate_to_millis(now);
        let bounds = Self::bounds_at(config, now);
        let days_until_reset = ceil_days(now, bounds.period_end + Duration::days(1));
        debug!(
            %config,
            %now,
            start = %bounds.period_start,
            end = %bounds.period_end,
            days_until_reset,
            "computed budget window"
        );
        PeriodWindow {
            period_start: bounds.period_start,
            period_end: bounds.period_end,
            days_until_reset,
        }
    }

    /// Bounds of the period containing `instant`.
    pub fn bounds_at(config: &BudgetPeriodConfig, instant: NaiveDateTime) -> PeriodBounds {
        let today = instant.date();
        match config {
            BudgetPeriodConfig::Weekly { week_start_day } => {
                let current = i64::from(today.weekday().num_days_from_sunday());
                let days_since_start = (current - i64::from(week_start_day.get()) + 7) % 7;
                let start = today - Duration::days(days_since_start);
                PeriodBounds::from_dates(start, start + Duration::days(6))
            }
            BudgetPeriodConfig::Monthly { month_start_day } => {
                let candidate = today
                    .with_day(u32::from(month_start_day.get()))
                    .unwrap_or(today);
                let start = if candidate > today {
                    add_months(candidate, -1)
                } else {
                    candidate
                };
                PeriodBounds::from_dates(start, add_months(start, 1) - Duration::days(1))
            }
        }
    }

    /// The period immediately before `bounds`.
    pub fn previous_bounds(config: &BudgetPeriodConfig, bounds: &PeriodBounds) -> PeriodBounds {
        Self::bounds_at(config, start_of_day(bounds.start_date() - Duration::days(1)))
    }

    /// The period immediately after `bounds`.
    pub fn next_bounds(config: &BudgetPeriodConfig, bounds: &PeriodBounds) -> PeriodBounds {
        Self::bounds_at(config, start_of_day(bounds.reset_date()))
    }

    /// Consecutive periods covering `from` through `to`, oldest first.
    ///
    /// Empty when `to` precedes `from`; capped at 520 periods.
    pub fn bounds_between(
        config: &BudgetPeriodConfig,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Vec<PeriodBounds> {
        let mut result = Vec::new();
        if to < from {
            return result;
        }
        let mut current = Self::bounds_at(config, from);
        while current.period_start <= to && result.len() < MAX_WINDOWS {
            let next = Self::next_bounds(config, &current);
            result.push(current);
            current = next;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn start_days_are_validated() {
        assert!(WeekStartDay::new(6).is_ok());
        assert_eq!(WeekStartDay::new(7), Err(CoreError::InvalidWeekStartDay(7)));
        assert!(MonthStartDay::new(28).is_ok());
        assert_eq!(MonthStartDay::new(0), Err(CoreError::InvalidMonthStartDay(0)));
        assert_eq!(MonthStartDay::new(29), Err(CoreError::InvalidMonthStartDay(29)));
        assert_eq!(MonthStartDay::clamped(31).get(), 28);
        assert_eq!(MonthStartDay::clamped(0).get(), 1);
        assert_eq!(WeekStartDay::from(Weekday::Sat).get(), 6);
    }

    #[test]
    fn start_day_deserialization_is_validated() {
        let ok: BudgetPeriodConfig =
            serde_json::from_str(r#"{"period_type":"monthly","month_start_day":15}"#).unwrap();
        assert_eq!(ok, BudgetPeriodConfig::monthly(15).unwrap());
        let bad = serde_json::from_str::<BudgetPeriodConfig>(
            r#"{"period_type":"weekly","week_start_day":9}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn weekly_window_on_start_day_begins_today() {
        // 2025-03-10 is a Monday.
        let config = BudgetPeriodConfig::weekly(1).unwrap();
        let window = PeriodCalculator::compute_window(&config, at(2025, 3, 10, 0, 0));
        assert_eq!(window.period_start, at(2025, 3, 10, 0, 0));
        assert_eq!(window.period_end, end_of_day(date(2025, 3, 16)));
        // Counts today through the reset day inclusive.
        assert_eq!(window.days_until_reset, 8);
    }

    #[test]
    fn weekly_window_wraps_across_month_and_year() {
        // 2025-01-01 is a Wednesday; a Saturday start reaches back into 2024.
        let config = BudgetPeriodConfig::weekly(6).unwrap();
        let window = PeriodCalculator::compute_window(&config, at(2025, 1, 1, 8, 0));
        assert_eq!(window.period_start, at(2024, 12, 28, 0, 0));
        assert_eq!(window.period_end.date(), date(2025, 1, 3));
    }

    #[test]
    fn last_millisecond_of_period_still_resets_in_one_day() {
        let config = BudgetPeriodConfig::monthly(1).unwrap();
        let now = end_of_day(date(2025, 2, 28));
        let window = PeriodCalculator::compute_window(&config, now);
        assert_eq!(window.period_start, at(2025, 2, 1, 0, 0));
        assert_eq!(window.period_end, now);
        assert_eq!(window.days_until_reset, 1);
    }

    #[test]
    fn monthly_window_handles_january_rollback() {
        let config = BudgetPeriodConfig::monthly(20).unwrap();
        let window = PeriodCalculator::compute_window(&config, at(2025, 1, 5, 12, 0));
        assert_eq!(window.period_start, at(2024, 12, 20, 0, 0));
        assert_eq!(window.period_end.date(), date(2025, 1, 19));
    }

    #[test]
    fn monthly_window_spans_february_in_leap_year() {
        let config = BudgetPeriodConfig::monthly(1).unwrap();
        let window = PeriodCalculator::compute_window(&config, at(2024, 2, 10, 9, 0));
        assert_eq!(window.length_days(), 29);
        assert_eq!(window.reset_date(), date(2024, 3, 1));
    }

    #[test]
    fn from_budget_uses_defaults_and_policy() {
        let mut budget = Budget::weekly("Food", 150.0, 1);
        budget.week_start_day = None;
        let defaults = CycleDefaults {
            week_start_day: 3,
            month_start_day: 1,
        };
        let config =
            BudgetPeriodConfig::from_budget(&budget, PreconditionPolicy::Reject, defaults).unwrap();
        assert_eq!(config, BudgetPeriodConfig::weekly(3).unwrap());

        let broken = Budget::monthly("Rent", 900.0, 31);
        assert_eq!(
            BudgetPeriodConfig::from_budget(&broken, PreconditionPolicy::Reject, defaults),
            Err(CoreError::InvalidMonthStartDay(31))
        );
        assert_eq!(
            BudgetPeriodConfig::from_budget(&broken, PreconditionPolicy::Clamp, defaults),
            BudgetPeriodConfig::monthly(28)
        );
    }

    #[test]
    fn from_budget_ignores_inactive_start_day() {
        let mut budget = Budget::monthly("Fun", 80.0, 5);
        budget.week_start_day = Some(42);
        let config = BudgetPeriodConfig::from_budget(
            &budget,
            PreconditionPolicy::Reject,
            CycleDefaults::default(),
        )
        .unwrap();
        assert_eq!(config.period_type(), BudgetPeriodType::Monthly);
    }

    #[test]
    fn previous_and_next_bounds_are_adjacent() {
        let config = BudgetPeriodConfig::monthly(15).unwrap();
        let current = PeriodCalculator::bounds_at(&config, at(2025, 3, 20, 10, 0));
        let previous = PeriodCalculator::previous_bounds(&config, &current);
        let next = PeriodCalculator::next_bounds(&config, &current);
        assert_eq!(previous.start_date(), date(2025, 2, 15));
        assert_eq!(previous.reset_date(), current.start_date());
        assert_eq!(next.start_date(), date(2025, 4, 15));
        assert_eq!(current.reset_date(), next.start_date());
    }

    #[test]
    fn bounds_between_covers_the_range() {
        let config = BudgetPeriodConfig::weekly(0).unwrap();
        let windows =
            PeriodCalculator::bounds_between(&config, at(2025, 3, 1, 0, 0), at(2025, 3, 31, 0, 0));
        // 2025-03-01 is a Saturday, so the first week started on 2025-02-23.
        assert_eq!(windows.first().unwrap().start_date(), date(2025, 2, 23));
        assert_eq!(windows.last().unwrap().start_date(), date(2025, 3, 30));
        assert_eq!(windows.len(), 6);
        assert!(PeriodCalculator::bounds_between(
            &config,
            at(2025, 3, 31, 0, 0),
            at(2025, 3, 1, 0, 0)
        )
        .is_empty());
    }
}
