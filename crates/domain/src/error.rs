//! Domain error types.

use booking_store::StoreError;
use common::Money;
use thiserror::Error;

/// Errors surfaced by the booking core.
///
/// Every variant is recoverable at the boundary of the calling flow; none
/// is retried automatically.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The store could not be reached.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    /// No active promo code matches.
    #[error("Invalid promo code: {code}")]
    InvalidPromoCode { code: String },

    /// The subtotal is below the promo code's minimum order amount.
    #[error("Minimum order amount is {minimum}")]
    BelowMinimumOrder { minimum: Money },

    /// The requested guest count does not fit the slot.
    #[error("Only {available} spots available")]
    InsufficientCapacity { available: u32 },

    /// A write (or a non-transport read) failed.
    #[error("Persistence error: {0}")]
    PersistenceError(#[source] StoreError),

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The applied promo was computed for a different subtotal.
    #[error(
        "Promo code {code} was applied to a subtotal of {applied_to} but the subtotal is now {current}"
    )]
    StalePromo {
        code: String,
        applied_to: Money,
        current: Money,
    },

    /// A required contact field is missing or malformed.
    #[error("Invalid contact details: {field}")]
    InvalidContact { field: &'static str },
}

impl DomainError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Short, stable label used for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            DomainError::StoreUnavailable(_) => "store_unavailable",
            DomainError::InvalidPromoCode { .. } => "invalid_promo_code",
            DomainError::BelowMinimumOrder { .. } => "below_minimum_order",
            DomainError::InsufficientCapacity { .. } => "insufficient_capacity",
            DomainError::PersistenceError(_) => "persistence_error",
            DomainError::NotFound { .. } => "not_found",
            DomainError::StalePromo { .. } => "stale_promo",
            DomainError::InvalidContact { .. } => "invalid_contact",
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        if e.is_unavailable() {
            DomainError::StoreUnavailable(e)
        } else {
            DomainError::PersistenceError(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_map_to_unavailable() {
        let err: DomainError = StoreError::Unavailable("offline".into()).into();
        assert!(matches!(err, DomainError::StoreUnavailable(_)));

        let err: DomainError = StoreError::InvalidRecord("bad".into()).into();
        assert!(matches!(err, DomainError::PersistenceError(_)));
    }

    #[test]
    fn thresholds_appear_in_messages() {
        let err = DomainError::BelowMinimumOrder {
            minimum: Money::from_units(500),
        };
        assert_eq!(err.to_string(), "Minimum order amount is ₹500.00");

        let err = DomainError::InsufficientCapacity { available: 3 };
        assert_eq!(err.to_string(), "Only 3 spots available");
    }
}
