//! Lifecycle state of recurring expenses: due dates, urgency, progress and cost.
//!
//! Progress uses fixed 7/30/90/365-day periods so that progress bars stay
//! stable across months of different length.

use std::{fmt, ops::Add};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use cadence_domain::{Frequency, PreconditionPolicy, RecurringExpense};

use crate::{
    calendar::{ceil_days, start_of_day, truncate_to_millis},
    validation::{checked_amount, checked_entity_amount},
    CoreError,
};

const DUE_SOON_DAYS: i64 = 3;
const THIS_WEEK_DAYS: i64 = 7;

/// Coarse classification of how soon a payment is due, ordered most urgent first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    /// Due today or earlier.
    Overdue,
    /// Due in 1 to 3 days.
    DueSoon,
    /// Due in 4 to 7 days.
    ThisWeek,
    /// Due in more than 7 days.
    Upcoming,
}

impl UrgencyTier {
    pub const ALL: [UrgencyTier; 4] = [
        UrgencyTier::Overdue,
        UrgencyTier::DueSoon,
        UrgencyTier::ThisWeek,
        UrgencyTier::Upcoming,
    ];

    pub fn from_days(days_until_due: i64) -> Self {
        if days_until_due <= 0 {
            UrgencyTier::Overdue
        } else if days_until_due <= DUE_SOON_DAYS {
            UrgencyTier::DueSoon
        } else if days_until_due <= THIS_WEEK_DAYS {
            UrgencyTier::ThisWeek
        } else {
            UrgencyTier::Upcoming
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UrgencyTier::Overdue => "Overdue",
            UrgencyTier::DueSoon => "Due soon",
            UrgencyTier::ThisWeek => "This week",
            UrgencyTier::Upcoming => "Upcoming",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs for a single recurring payment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceConfig {
    pub frequency: Frequency,
    /// Date-only; the time of day is ignored.
    pub next_expected_date: NaiveDate,
    /// Non-negative.
    pub amount: f64,
}

impl RecurrenceConfig {
    pub fn new(frequency: Frequency, next_expected_date: NaiveDate, amount: f64) -> Self {
        Self {
            frequency,
            next_expected_date,
            amount,
        }
    }

    /// Builds a configuration from raw caller values that have no backing entity.
    ///
    /// `amount` is checked against `policy`; errors carry the nil id.
    pub fn checked(
        frequency: Frequency,
        next_expected_date: NaiveDate,
        amount: f64,
        policy: PreconditionPolicy,
    ) -> Result<Self, CoreError> {
        let amount = checked_amount(amount, policy, Uuid::nil())?;
        Ok(Self::new(frequency, next_expected_date, amount))
    }

    /// Builds the configuration for an expense entity, checking its amount against `policy`.
    pub fn from_expense(
        expense: &RecurringExpense,
        policy: PreconditionPolicy,
    ) -> Result<Self, CoreError> {
        let amount = checked_entity_amount(expense, policy)?;
        Ok(Self::new(
            expense.frequency,
            expense.next_expected_date,
            amount,
        ))
    }
}

/// Annualized cost of a recurring payment and its per-period equivalents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CostProjection {
    pub annual_cost: f64,
    pub monthly_average: f64,
    pub weekly_average: f64,
    pub daily_average: f64,
}

impl CostProjection {
    pub fn for_amount(amount: f64, frequency: Frequency) -> Self {
        Self::from_annual(amount * frequency.annual_multiplier())
    }

    pub fn from_annual(annual_cost: f64) -> Self {
        Self {
            annual_cost,
            monthly_average: annual_cost / 12.0,
            weekly_average: annual_cost / 52.0,
            daily_average: annual_cost / 365.0,
        }
    }
}

impl Add for CostProjection {
    type Output = CostProjection;

    fn add(self, rhs: Self) -> Self::Output {
        CostProjection {
            annual_cost: self.annual_cost + rhs.annual_cost,
            monthly_average: self.monthly_average + rhs.monthly_average,
            weekly_average: self.weekly_average + rhs.weekly_average,
            daily_average: self.daily_average + rhs.daily_average,
        }
    }
}

/// Derived state of a recurring payment at a given `now`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceStatus {
    /// Negative when overdue, zero when due today.
    pub days_until_due: i64,
    pub urgency_tier: UrgencyTier,
    /// In [0, 100]; exactly 100 once due.
    pub period_progress_percent: f64,
    #[serde(flatten)]
    pub costs: CostProjection,
}

impl RecurrenceStatus {
    pub fn is_overdue(&self) -> bool {
        self.urgency_tier == UrgencyTier::Overdue
    }
}

/// Stateless recurrence computations.
pub struct RecurrenceTracker;

impl RecurrenceTracker {
    pub fn compute_status(config: &RecurrenceConfig, now: NaiveDateTime) -> RecurrenceStatus {
        let days_until_due = Self::days_until_due(config.next_expected_date, now);
        let urgency_tier = UrgencyTier::from_days(days_until_due);
        let period_progress_percent = Self::period_progress(config.frequency, days_until_due);
        debug!(
            frequency = %config.frequency,
            due = %config.next_expected_date,
            days_until_due,
            tier = %urgency_tier,
            "computed recurrence status"
        );
        RecurrenceStatus {
            days_until_due,
            urgency_tier,
            period_progress_percent,
            costs: CostProjection::for_amount(config.amount, config.frequency),
        }
    }

    /// Whole days from `now` to the start of `due`, rounded up.
    pub fn days_until_due(due: NaiveDate, now: NaiveDateTime) -> i64 {
        ceil_days(truncate_to_millis(now), start_of_day(due))
    }

    /// Share of the nominal billing period already elapsed, in percent.
    pub fn period_progress(frequency: Frequency, days_until_due: i64) -> f64 {
        if days_until_due <= 0 {
            return 100.0;
        }
        let total = frequency.nominal_days() as f64;
        let elapsed = (total - days_until_due as f64) / total * 100.0;
        elapsed.clamp(0.0, 100.0)
    }
}
