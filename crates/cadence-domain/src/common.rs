//! Shared traits and enums for scheduling primitives.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities supplied by the data layer.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// How out-of-range configuration values coming from raw entities are handled.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PreconditionPolicy {
    /// Fail fast with a validation error.
    #[default]
    Reject,
    /// Clamp into the valid range and log a warning.
    Clamp,
}

impl fmt::Display for PreconditionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PreconditionPolicy::Reject => "reject",
            PreconditionPolicy::Clamp => "clamp",
        };
        f.write_str(label)
    }
}

/// Cycle-start days used when a budget does not carry its own.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleDefaults {
    /// Weekday, 0 = Sunday.
    pub week_start_day: u8,
    /// Day of month, 1..=28.
    pub month_start_day: u8,
}

impl Default for CycleDefaults {
    fn default() -> Self {
        Self {
            week_start_day: 0,
            month_start_day: 1,
        }
    }
}
