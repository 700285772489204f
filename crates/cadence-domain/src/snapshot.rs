//! Bundle of raw entities handed to the engine by a frontend.

use serde::{Deserialize, Serialize};

use crate::{Budget, RecurringExpense, Transaction};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub recurring_expenses: Vec<RecurringExpense>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty() && self.recurring_expenses.is_empty() && self.transactions.is_empty()
    }
}
