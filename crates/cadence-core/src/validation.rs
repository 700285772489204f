//! Applies a [`PreconditionPolicy`] to raw values coming from the data layer.

use cadence_domain::{Amounted, Identifiable, NamedEntity, PreconditionPolicy};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::CoreError;

/// Validates `raw` with `strict`; under [`PreconditionPolicy::Clamp`] a failure
/// is replaced by `clamp(raw)` and logged.
pub fn resolve_with_policy<T>(
    raw: u8,
    policy: PreconditionPolicy,
    entity: Uuid,
    field: &'static str,
    strict: fn(u8) -> Result<T, CoreError>,
    clamp: fn(u8) -> T,
) -> Result<T, CoreError> {
    match strict(raw) {
        Ok(value) => Ok(value),
        Err(err) => match policy {
            PreconditionPolicy::Reject => Err(err),
            PreconditionPolicy::Clamp => {
                warn!(%entity, field, raw, "value out of range, clamping");
                Ok(clamp(raw))
            }
        },
    }
}

/// Rejects (or floors at zero) negative and non-finite amounts.
pub fn checked_amount(
    amount: f64,
    policy: PreconditionPolicy,
    entity: Uuid,
) -> Result<f64, CoreError> {
    if amount.is_finite() && amount >= 0.0 {
        return Ok(amount);
    }
    match policy {
        PreconditionPolicy::Reject => {
            if amount.is_nan() {
                Err(CoreError::Validation(format!("amount on {entity} is not a number")))
            } else {
                Err(CoreError::NegativeAmount { entity, amount })
            }
        }
        PreconditionPolicy::Clamp => {
            warn!(%entity, amount, "amount out of range, clamping to zero");
            Ok(0.0)
        }
    }
}

/// [`checked_amount`] applied to a data-layer entity.
pub fn checked_entity_amount<E>(entity: &E, policy: PreconditionPolicy) -> Result<f64, CoreError>
where
    E: Identifiable + NamedEntity + Amounted,
{
    let amount = entity.amount();
    if !(amount.is_finite() && amount >= 0.0) {
        debug!(name = entity.name(), amount, %policy, "entity amount out of range");
    }
    checked_amount(amount, policy, entity.id())
}
