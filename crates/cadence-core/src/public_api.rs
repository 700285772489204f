//! Stable, public-facing helpers that wrap the service layer.
//!
//! Frontends (CLI, FFI) rely on this module instead of wiring the
//! individual calculators together themselves.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use cadence_domain::{CycleDefaults, PreconditionPolicy, Snapshot};

use crate::{
    budget_service::{BudgetPeriodSummary, BudgetService},
    schedule_service::{AgendaEntry, CommitmentSummary, ScheduleService},
    CoreError,
};

/// Everything a dashboard needs at a given instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub generated_at: NaiveDateTime,
    pub budgets: Vec<BudgetPeriodSummary>,
    pub agenda: Vec<AgendaEntry>,
    pub commitments: CommitmentSummary,
}

/// Builds the budget summaries, agenda, and commitments for `snapshot` at `now`.
pub fn api_overview(
    snapshot: &Snapshot,
    now: NaiveDateTime,
    policy: PreconditionPolicy,
    defaults: CycleDefaults,
) -> Result<Overview, CoreError> {
    let budgets = snapshot
        .budgets
        .iter()
        .map(|budget| {
            BudgetService::summarize(budget, &snapshot.transactions, now, policy, defaults)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let agenda = ScheduleService::agenda(&snapshot.recurring_expenses, now, policy)?;
    let commitments = ScheduleService::summarize_agenda(&agenda);
    Ok(Overview {
        generated_at: now,
        budgets,
        agenda,
        commitments,
    })
}
