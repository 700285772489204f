//! cadence-core
//!
//! Scheduling engine for budgets and recurring expenses.
//! Depends on cadence-domain. Every computation takes an explicit `now`;
//! nothing here reads the system clock, touches the filesystem, or blocks.

pub mod budget_service;
pub mod calendar;
pub mod error;
pub mod period;
pub mod public_api;
pub mod recurrence;
pub mod schedule_service;
pub mod time;
pub mod validation;

pub use budget_service::*;
pub use error::CoreError;
pub use period::*;
pub use public_api::*;
pub use recurrence::*;
pub use schedule_service::*;
pub use time::*;

/// Semantic version of the engine crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod period_props;
#[cfg(test)]
mod recurrence_props;
