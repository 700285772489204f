//! Agenda, commitment totals, and due-date maintenance for recurring expenses.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cadence_domain::{Frequency, PreconditionPolicy, RecurringExpense};

use crate::{
    recurrence::{CostProjection, RecurrenceConfig, RecurrenceStatus, RecurrenceTracker, UrgencyTier},
    CoreError,
};

const MAX_CATCH_UP_STEPS: u32 = 1024;

/// One active recurring expense with its computed status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgendaEntry {
    pub expense_id: Uuid,
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub next_expected_date: NaiveDate,
    pub status: RecurrenceStatus,
}

/// Aggregate projected cost and urgency counts over active expenses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitmentSummary {
    pub active_count: usize,
    pub overdue_count: usize,
    pub due_soon_count: usize,
    pub this_week_count: usize,
    pub upcoming_count: usize,
    /// Sum of amounts whose due date has been reached.
    pub overdue_amount: f64,
    pub costs: CostProjection,
}

impl CommitmentSummary {
    pub fn count_for(&self, tier: UrgencyTier) -> usize {
        match tier {
            UrgencyTier::Overdue => self.overdue_count,
            UrgencyTier::DueSoon => self.due_soon_count,
            UrgencyTier::ThisWeek => self.this_week_count,
            UrgencyTier::Upcoming => self.upcoming_count,
        }
    }
}

pub struct ScheduleService;

impl ScheduleService {
    /// Statuses of active expenses, soonest due first, ties broken by name.
    pub fn agenda(
        expenses: &[RecurringExpense],
        now: NaiveDateTime,
        policy: PreconditionPolicy,
    ) -> Result<Vec<AgendaEntry>, CoreError> {
        let mut entries = Vec::new();
        for expense in expenses.iter().filter(|expense| expense.is_active) {
            let config = RecurrenceConfig::from_expense(expense, policy)?;
            entries.push(AgendaEntry {
                expense_id: expense.id,
                name: expense.name.clone(),
                amount: config.amount,
                frequency: expense.frequency,
                next_expected_date: expense.next_expected_date,
                status: RecurrenceTracker::compute_status(&config, now),
            });
        }
        entries.sort_by(|a, b| {
            a.status
                .days_until_due
                .cmp(&b.status.days_until_due)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(entries)
    }

    /// Totals over the agenda of active expenses.
    pub fn commitments(
        expenses: &[RecurringExpense],
        now: NaiveDateTime,
        policy: PreconditionPolicy,
    ) -> Result<CommitmentSummary, CoreError> {
        let agenda = Self::agenda(expenses, now, policy)?;
        Ok(Self::summarize_agenda(&agenda))
    }

    pub fn summarize_agenda(agenda: &[AgendaEntry]) -> CommitmentSummary {
        agenda
            .iter()
            .fold(CommitmentSummary::default(), |mut summary, entry| {
                summary.active_count += 1;
                match entry.status.urgency_tier {
                    UrgencyTier::Overdue => {
                        summary.overdue_count += 1;
                        summary.overdue_amount += entry.amount;
                    }
                    UrgencyTier::DueSoon => summary.due_soon_count += 1,
                    UrgencyTier::ThisWeek => summary.this_week_count += 1,
                    UrgencyTier::Upcoming => summary.upcoming_count += 1,
                }
                summary.costs = summary.costs + entry.status.costs;
                summary
            })
    }

    /// Due date that follows a payment made on `paid_on`.
    ///
    /// Steps forward from the current due date by whole periods until the
    /// result lies after `paid_on`; always advances at least once. Every step
    /// is measured from the current due date, so month-end anchors do not drift.
    pub fn next_after_payment(expense: &RecurringExpense, paid_on: NaiveDate) -> NaiveDate {
        let anchor = expense.next_expected_date;
        let mut next = anchor;
        for periods in 1..=MAX_CATCH_UP_STEPS {
            match expense.frequency.advance_by(anchor, periods) {
                Some(candidate) => {
                    next = candidate;
                    if candidate > paid_on {
                        break;
                    }
                }
                None => break,
            }
        }
        next
    }
}
