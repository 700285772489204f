//! Budget entities as supplied by the external data layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Enumerates the supported budget cycles.
pub enum BudgetPeriodType {
    Weekly,
    #[default]
    Monthly,
}

impl fmt::Display for BudgetPeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetPeriodType::Weekly => "Weekly",
            BudgetPeriodType::Monthly => "Monthly",
        };
        f.write_str(label)
    }
}

/// A spending budget with a recurring cycle.
///
/// Only one of `week_start_day` / `month_start_day` is meaningful, selected by
/// `period_type`. A missing value falls back to [`CycleDefaults`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub period_type: BudgetPeriodType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_start_day: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_start_day: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub rollover: bool,
}

impl Budget {
    pub fn weekly(name: impl Into<String>, amount: f64, week_start_day: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            period_type: BudgetPeriodType::Weekly,
            week_start_day: Some(week_start_day),
            month_start_day: None,
            category_id: None,
            rollover: false,
        }
    }

    pub fn monthly(name: impl Into<String>, amount: f64, month_start_day: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            period_type: BudgetPeriodType::Monthly,
            week_start_day: None,
            month_start_day: Some(month_start_day),
            category_id: None,
            rollover: false,
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_rollover(mut self, rollover: bool) -> Self {
        self.rollover = rollover;
        self
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Budget {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Budget {
    fn amount(&self) -> f64 {
        self.amount
    }
}
