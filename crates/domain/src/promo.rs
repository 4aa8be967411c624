//! Promo code validation and discount computation.

use booking_store::{BookingStore, DiscountRule, normalize_code};
use common::Money;
use serde::Serialize;

use crate::error::DomainError;

/// A promo code accepted against a specific subtotal.
///
/// Only [`PromoValidator::apply_promo`] produces these. The subtotal is kept
/// so a booking can tell when the guest count changed after the code was
/// applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedPromo {
    code: String,
    discount: Money,
    subtotal: Money,
}

impl AppliedPromo {
    /// The normalized (uppercase) code.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    /// The subtotal the discount was computed from.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }
}

/// Computes the discount a rule grants on `subtotal`, never more than the
/// subtotal itself.
pub fn compute_discount(rule: DiscountRule, subtotal: Money) -> Money {
    let raw = match rule {
        DiscountRule::Percentage(percent) => percent.of(subtotal),
        DiscountRule::Fixed(amount) => amount,
    };
    raw.min(subtotal).max(Money::zero())
}

/// Looks up promo codes and prices them against a subtotal.
pub struct PromoValidator<S: BookingStore> {
    store: S,
}

impl<S: BookingStore> PromoValidator<S> {
    /// Creates a new promo validator over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates `code` for `subtotal` and returns the discount it grants.
    ///
    /// Read-only; calling it again with the same inputs recomputes the same
    /// discount from the store's current promo row.
    #[tracing::instrument(skip(self))]
    pub async fn apply_promo(
        &self,
        code: &str,
        subtotal: Money,
    ) -> Result<AppliedPromo, DomainError> {
        let result = self.try_apply(code, subtotal).await;
        let outcome = match &result {
            Ok(_) => "applied",
            Err(e) => e.reason(),
        };
        metrics::counter!("promo_applications_total", "outcome" => outcome).increment(1);
        result
    }

    async fn try_apply(&self, code: &str, subtotal: Money) -> Result<AppliedPromo, DomainError> {
        let code = normalize_code(code);
        if code.is_empty() {
            return Err(DomainError::InvalidPromoCode { code });
        }

        let promo = self
            .store
            .find_active_promo_code(&code)
            .await?
            .ok_or_else(|| DomainError::InvalidPromoCode { code: code.clone() })?;

        if subtotal < promo.min_amount {
            return Err(DomainError::BelowMinimumOrder {
                minimum: promo.min_amount,
            });
        }

        let discount = compute_discount(promo.rule, subtotal);
        tracing::debug!(%code, %subtotal, %discount, "promo code applied");

        Ok(AppliedPromo {
            code,
            discount,
            subtotal,
        })
    }
}
