use std::{fs, path::Path};

use tracing::info;

use cadence_domain::Snapshot;

use crate::errors::AppError;

/// Loads a snapshot of budgets, recurring expenses and transactions.
pub fn load_snapshot_from_file(path: &Path) -> Result<Snapshot, AppError> {
    let data = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&data)?;
    info!(
        path = %path.display(),
        budgets = snapshot.budgets.len(),
        recurring_expenses = snapshot.recurring_expenses.len(),
        transactions = snapshot.transactions.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}
