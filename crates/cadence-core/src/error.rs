use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Invalid week start day {0}: expected 0 (Sunday) through 6 (Saturday)")]
    InvalidWeekStartDay(u8),
    #[error("Invalid month start day {0}: expected 1 through 28")]
    InvalidMonthStartDay(u8),
    #[error("Negative amount {amount} on {entity}")]
    NegativeAmount { entity: Uuid, amount: f64 },
    #[error("Validation failed: {0}")]
    Validation(String),
}
