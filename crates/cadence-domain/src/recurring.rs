//! Recurring expense (bill) entities and billing frequencies.

use std::fmt;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Enumerates how often a recurring expense is charged.
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Yearly,
    ];

    /// Number of charges per year.
    pub fn annual_multiplier(self) -> f64 {
        match self {
            Frequency::Weekly => 52.0,
            Frequency::Monthly => 12.0,
            Frequency::Quarterly => 4.0,
            Frequency::Yearly => 1.0,
        }
    }

    /// Approximate day-count of one billing period, used for progress bars only.
    pub fn nominal_days(self) -> i64 {
        match self {
            Frequency::Weekly => 7,
            Frequency::Monthly => 30,
            Frequency::Quarterly => 90,
            Frequency::Yearly => 365,
        }
    }

    /// Calculates the due date one period after `from`.
    ///
    /// Month-based steps clamp to the last day of shorter months.
    pub fn advance(self, from: NaiveDate) -> NaiveDate {
        self.advance_by(from, 1).unwrap_or(from)
    }

    /// Due date `periods` whole periods after `from`, measured from `from` itself.
    ///
    /// Each result clamps independently, so an anchor on the 31st lands on the
    /// 31st again whenever the target month has one. `None` past the calendar range.
    pub fn advance_by(self, from: NaiveDate, periods: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Weekly => from.checked_add_signed(Duration::weeks(i64::from(periods))),
            _ => from.checked_add_months(Months::new(self.months().checked_mul(periods)?)),
        }
    }

    /// Calculates the due date one period before `from`.
    pub fn retreat(self, from: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Weekly => from.checked_sub_signed(Duration::weeks(1)).unwrap_or(from),
            _ => from
                .checked_sub_months(Months::new(self.months()))
                .unwrap_or(from),
        }
    }

    fn months(self) -> u32 {
        match self {
            Frequency::Weekly => 0,
            Frequency::Monthly => 1,
            Frequency::Quarterly => 3,
            Frequency::Yearly => 12,
        }
    }

    /// Parses a case-insensitive frequency name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Some(Frequency::Weekly),
            "monthly" => Some(Frequency::Monthly),
            "quarterly" => Some(Frequency::Quarterly),
            "yearly" | "annual" | "annually" => Some(Frequency::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

/// A predicted future payment, distinct from a realized transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringExpense {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub next_expected_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default = "RecurringExpense::default_active")]
    pub is_active: bool,
}

impl RecurringExpense {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        frequency: Frequency,
        next_expected_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            frequency,
            next_expected_date,
            category_id: None,
            is_active: true,
        }
    }

    pub fn default_active() -> bool {
        true
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

impl Identifiable for RecurringExpense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for RecurringExpense {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for RecurringExpense {
    fn amount(&self) -> f64 {
        self.amount
    }
}
