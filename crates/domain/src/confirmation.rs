//! Confirmation view for a persisted booking.

use booking_store::{Booking, BookingId, BookingStore, Experience, Slot};
use common::Money;
use serde::Serialize;

use crate::error::DomainError;
use crate::pricing::PriceBreakdown;

/// A booking joined with its slot and experience.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confirmation {
    pub booking: Booking,
    pub slot: Slot,
    pub experience: Experience,
}

impl Confirmation {
    /// The amount before the discount was taken off.
    pub fn original_amount(&self) -> Money {
        self.booking.total_price + self.booking.discount_amount
    }

    /// The discount, only when one was actually granted.
    pub fn discount(&self) -> Option<Money> {
        self.booking
            .discount_amount
            .is_positive()
            .then_some(self.booking.discount_amount)
    }

    /// Price breakdown as recorded on the booking.
    ///
    /// Uses the amounts stored with the booking, not the experience's
    /// current price.
    pub fn breakdown(&self) -> PriceBreakdown {
        let subtotal = self.original_amount();
        PriceBreakdown {
            unit_price: per_guest(subtotal, self.booking.num_guests),
            guests: self.booking.num_guests,
            subtotal,
            discount: self.booking.discount_amount,
            total: self.booking.total_price,
        }
    }
}

fn per_guest(subtotal: Money, guests: u32) -> Money {
    if guests == 0 {
        return subtotal;
    }
    Money::from_cents(subtotal.cents() / i64::from(guests))
}

/// Assembles confirmations from three sequential lookups.
pub struct ConfirmationAssembler<S: BookingStore> {
    store: S,
}

impl<S: BookingStore> ConfirmationAssembler<S> {
    /// Creates a new assembler over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads booking, then slot, then experience. Any missing link is
    /// `NotFound`.
    #[tracing::instrument(skip(self))]
    pub async fn get_confirmation(&self, booking_id: BookingId) -> Result<Confirmation, DomainError> {
        let booking = self
            .store
            .get_booking(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))?;

        let slot = self
            .store
            .get_slot(booking.slot_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Slot", booking.slot_id))?;

        let experience = self
            .store
            .get_experience(slot.experience_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Experience", slot.experience_id))?;

        Ok(Confirmation {
            booking,
            slot,
            experience,
        })
    }
}
