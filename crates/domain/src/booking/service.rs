//! Booking service.

use std::time::Instant;

use booking_store::{Booking, BookingStore, NewBooking, StoreError};
use common::Money;

use crate::error::DomainError;
use crate::pricing::PriceBreakdown;

use super::CreateBooking;

/// Service for creating bookings.
///
/// Capacity is checked twice: once against a fresh read of the slot to give
/// an early, actionable error, and again by the store's conditional
/// decrement, which is the check that actually holds under concurrency.
pub struct BookingService<S: BookingStore> {
    store: S,
}

impl<S: BookingStore> BookingService<S> {
    /// Creates a new booking service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a confirmed booking and takes its capacity from the slot.
    #[tracing::instrument(
        skip(self, cmd),
        fields(slot_id = %cmd.slot_id, guests = cmd.guest_count)
    )]
    pub async fn create_booking(&self, cmd: CreateBooking) -> Result<Booking, DomainError> {
        let started = Instant::now();
        let result = self.try_create(cmd).await;

        let outcome = if result.is_ok() { "confirmed" } else { "rejected" };
        metrics::histogram!("booking_duration_seconds", "outcome" => outcome)
            .record(started.elapsed().as_secs_f64());

        match &result {
            Ok(booking) => {
                metrics::counter!("bookings_created_total").increment(1);
                tracing::info!(
                    booking_id = %booking.id,
                    total = %booking.total_price,
                    "booking confirmed"
                );
            }
            Err(e) => {
                metrics::counter!("bookings_rejected_total", "reason" => e.reason()).increment(1);
                tracing::warn!(reason = e.reason(), error = %e, "booking rejected");
            }
        }

        result
    }

    async fn try_create(&self, cmd: CreateBooking) -> Result<Booking, DomainError> {
        let contact = cmd.contact.validated()?;

        // 1. Capacity against the slot as it is now, not as it was at page load
        let slot = self
            .store
            .get_slot(cmd.slot_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Slot", cmd.slot_id))?;

        if cmd.guest_count == 0 || cmd.guest_count > slot.available_spots {
            return Err(DomainError::InsufficientCapacity {
                available: slot.available_spots,
            });
        }

        // 2. Price
        let experience = self
            .store
            .get_experience(slot.experience_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Experience", slot.experience_id))?;

        let subtotal = PriceBreakdown::subtotal_for(experience.price, cmd.guest_count);
        let discount = match &cmd.promo {
            Some(promo) if promo.subtotal() != subtotal => {
                return Err(DomainError::StalePromo {
                    code: promo.code().to_string(),
                    applied_to: promo.subtotal(),
                    current: subtotal,
                });
            }
            Some(promo) => promo.discount(),
            None => Money::zero(),
        };
        let price = PriceBreakdown::new(experience.price, cmd.guest_count, discount);

        // 3. Reserve and record in one step
        let new_booking = NewBooking {
            slot_id: slot.id,
            user_name: contact.name,
            user_email: contact.email,
            user_phone: contact.phone,
            num_guests: cmd.guest_count,
            total_price: price.total,
            promo_code: cmd.promo.map(|p| p.code().to_string()),
            discount_amount: price.discount,
        };

        self.store
            .create_booking(new_booking)
            .await
            .map_err(|e| match e {
                StoreError::InsufficientCapacity { available, .. } => {
                    DomainError::InsufficientCapacity { available }
                }
                StoreError::SlotNotFound(id) => DomainError::not_found("Slot", id),
                e if e.is_unavailable() => DomainError::StoreUnavailable(e),
                e => DomainError::PersistenceError(e),
            })
    }
}
