//! cadence-domain
//!
//! Pure domain models (Budget, RecurringExpense, Transaction, Snapshot).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod budget;
pub mod common;
pub mod recurring;
pub mod snapshot;
pub mod transaction;

pub use budget::*;
pub use common::*;
pub use recurring::*;
pub use snapshot::*;
pub use transaction::*;
