//! Checkout price computation.

use common::Money;
use serde::Serialize;

/// The price lines shown at checkout and on the confirmation.
///
/// The discount never exceeds the subtotal, so `total` is never negative and
/// `total + discount == subtotal` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub unit_price: Money,
    pub guests: u32,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

impl PriceBreakdown {
    /// Price per guest times guest count.
    pub fn subtotal_for(unit_price: Money, guests: u32) -> Money {
        unit_price.multiply(guests)
    }

    /// Builds the breakdown, clamping the discount to the subtotal.
    pub fn new(unit_price: Money, guests: u32, discount: Money) -> Self {
        let subtotal = Self::subtotal_for(unit_price, guests);
        let discount = discount.max(Money::zero()).min(subtotal);
        Self {
            unit_price,
            guests,
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }

    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }
}
