//! Provides per-period spending totals and rollover for budgets.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use cadence_domain::{
    Amounted, Budget, CycleDefaults, Identifiable, PreconditionPolicy, Transaction,
};

use crate::{
    period::{BudgetPeriodConfig, PeriodBounds, PeriodCalculator, PeriodWindow},
    validation::{checked_amount, checked_entity_amount},
    CoreError,
};

/// Utilization at or above which a budget is reported as [`BudgetStatus::OnTrack`].
const ON_TRACK_THRESHOLD_PERCENT: f64 = 80.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    UnderBudget,
    OnTrack,
    OverBudget,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::UnderBudget => "Under budget",
            BudgetStatus::OnTrack => "On track",
            BudgetStatus::OverBudget => "Over budget",
        };
        f.write_str(label)
    }
}

/// Spending state of one budget in its current period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetPeriodSummary {
    pub budget_id: Uuid,
    pub name: String,
    pub config: BudgetPeriodConfig,
    pub window: PeriodWindow,
    pub budgeted: f64,
    /// Unspent amount carried over from the previous period.
    pub rollover_in: f64,
    pub available: f64,
    pub spent: f64,
    pub remaining: f64,
    pub utilization_percent: f64,
    /// Remaining amount spread evenly over the days left in the period.
    pub daily_allowance: f64,
    pub status: BudgetStatus,
}

/// Stateless budgeting utilities over caller-supplied transactions.
pub struct BudgetService;

impl BudgetService {
    /// Sums expense transactions that belong to `budget` and fall inside `bounds`.
    ///
    /// A budget without a category covers every expense. Each counted amount
    /// is checked against `policy`.
    pub fn spent_in_window(
        budget: &Budget,
        transactions: &[Transaction],
        bounds: &PeriodBounds,
        policy: PreconditionPolicy,
    ) -> Result<f64, CoreError> {
        transactions
            .iter()
            .filter(|txn| txn.is_expense())
            .filter(|txn| match budget.category_id {
                Some(category) => txn.category_id == Some(category),
                None => true,
            })
            .filter(|txn| bounds.contains_date(txn.date))
            .map(|txn| checked_amount(txn.amount(), policy, txn.id()))
            .sum()
    }

    /// Summarizes the period of `budget` that contains `now`.
    ///
    /// With rollover enabled, the previous period's unspent amount (never
    /// negative, one period deep) is added to what is available.
    pub fn summarize(
        budget: &Budget,
        transactions: &[Transaction],
        now: NaiveDateTime,
        policy: PreconditionPolicy,
        defaults: CycleDefaults,
    ) -> Result<BudgetPeriodSummary, CoreError> {
        let config = BudgetPeriodConfig::from_budget(budget, policy, defaults)?;
        let budgeted = checked_entity_amount(budget, policy)?;
        let window = PeriodCalculator::compute_window(&config, now);
        let bounds = window.bounds();

        let rollover_in = if budget.rollover {
            let previous = PeriodCalculator::previous_bounds(&config, &bounds);
            let previous_spent = Self::spent_in_window(budget, transactions, &previous, policy)?;
            (budgeted - previous_spent).max(0.0)
        } else {
            0.0
        };

        let available = budgeted + rollover_in;
        let spent = Self::spent_in_window(budget, transactions, &bounds, policy)?;
        let remaining = available - spent;
        let utilization_percent = if available > 0.0 {
            spent / available * 100.0
        } else {
            0.0
        };
        let daily_allowance = remaining.max(0.0) / window.days_until_reset as f64;
        let status = if spent > available {
            BudgetStatus::OverBudget
        } else if utilization_percent >= ON_TRACK_THRESHOLD_PERCENT {
            BudgetStatus::OnTrack
        } else {
            BudgetStatus::UnderBudget
        };

        debug!(budget = %budget.name, spent, available, %status, "summarized budget period");

        Ok(BudgetPeriodSummary {
            budget_id: budget.id,
            name: budget.name.clone(),
            config,
            window,
            budgeted,
            rollover_in,
            available,
            spent,
            remaining,
            utilization_percent,
            daily_allowance,
            status,
        })
    }
}
