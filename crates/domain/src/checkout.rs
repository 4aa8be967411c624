//! Checkout session state.
//!
//! A [`Checkout`] holds what the checkout page shows between loading a slot
//! and submitting the booking: the experience, the slot as last read, the
//! guest count and an applied promo. The promo is tied to the subtotal it
//! was computed from, so changing the guest count drops it.

use booking_store::{BookingStore, Experience, Slot, SlotId};
use common::Money;

use crate::booking::{Contact, CreateBooking};
use crate::error::DomainError;
use crate::pricing::PriceBreakdown;
use crate::promo::{AppliedPromo, PromoValidator};

#[derive(Debug, Clone)]
pub struct Checkout {
    experience: Experience,
    slot: Slot,
    guests: u32,
    promo: Option<AppliedPromo>,
}

impl Checkout {
    /// Loads the slot and its experience for a new checkout with one guest.
    #[tracing::instrument(skip(store))]
    pub async fn load<S: BookingStore>(store: &S, slot_id: SlotId) -> Result<Self, DomainError> {
        let slot = store
            .get_slot(slot_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Slot", slot_id))?;

        if slot.is_full() {
            return Err(DomainError::InsufficientCapacity { available: 0 });
        }

        let experience = store
            .get_experience(slot.experience_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Experience", slot.experience_id))?;

        Ok(Self {
            experience,
            slot,
            guests: 1,
            promo: None,
        })
    }

    pub fn experience(&self) -> &Experience {
        &self.experience
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    pub fn guests(&self) -> u32 {
        self.guests
    }

    pub fn promo(&self) -> Option<&AppliedPromo> {
        self.promo.as_ref()
    }

    /// Sets the guest count, between one and the slot's open spots.
    ///
    /// A different count clears the applied promo.
    pub fn set_guest_count(&mut self, guests: u32) -> Result<(), DomainError> {
        if guests == 0 || guests > self.slot.available_spots {
            return Err(DomainError::InsufficientCapacity {
                available: self.slot.available_spots,
            });
        }
        if guests != self.guests {
            self.guests = guests;
            self.promo = None;
        }
        Ok(())
    }

    /// Validates `code` against the current subtotal and keeps the result.
    ///
    /// A rejected code leaves no promo applied.
    pub async fn apply_promo<S: BookingStore>(
        &mut self,
        validator: &PromoValidator<S>,
        code: &str,
    ) -> Result<&AppliedPromo, DomainError> {
        self.promo = None;
        let applied = validator.apply_promo(code, self.subtotal()).await?;
        Ok(self.promo.insert(applied))
    }

    /// Price per guest times the guest count.
    pub fn subtotal(&self) -> Money {
        PriceBreakdown::subtotal_for(self.experience.price, self.guests)
    }

    /// The summary shown next to the checkout form.
    pub fn breakdown(&self) -> PriceBreakdown {
        let discount = self
            .promo
            .as_ref()
            .map(AppliedPromo::discount)
            .unwrap_or_default();
        PriceBreakdown::new(self.experience.price, self.guests, discount)
    }

    /// Turns the session into a booking command for `contact`.
    pub fn into_command(self, contact: Contact) -> CreateBooking {
        let cmd = CreateBooking::new(self.slot.id, self.guests, contact);
        match self.promo {
            Some(promo) => cmd.with_promo(promo),
            None => cmd,
        }
    }
}
