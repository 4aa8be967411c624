use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    Booking, BookingId, Experience, ExperienceId, NewBooking, PromoCode, Result, Slot, SlotId,
    SlotQuery,
};

/// Core trait for booking store implementations.
///
/// A booking store is the relational backend behind the booking core: four
/// tables (experiences, slots, promo codes, bookings) reached through
/// select-by-filter, insert and one guarded update. All implementations must
/// be thread-safe (Send + Sync).
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Lists every experience, highest rated first. Unrated experiences
    /// come last.
    async fn list_experiences(&self) -> Result<Vec<Experience>>;

    /// Retrieves an experience by ID.
    async fn get_experience(&self, id: ExperienceId) -> Result<Option<Experience>>;

    /// Inserts an experience. Fails with `Duplicate` if the ID is taken.
    async fn put_experience(&self, experience: Experience) -> Result<()>;

    /// Retrieves slots matching a query, ordered by date then time.
    async fn query_slots(&self, query: SlotQuery) -> Result<Vec<Slot>>;

    /// Retrieves a slot by ID.
    async fn get_slot(&self, id: SlotId) -> Result<Option<Slot>>;

    /// Inserts a slot. The owning experience must exist.
    async fn put_slot(&self, slot: Slot) -> Result<()>;

    /// Looks up an active promo code by its normalized code.
    async fn find_active_promo_code(&self, code: &str) -> Result<Option<PromoCode>>;

    /// Inserts a promo code. Fails with `Duplicate` if the code is taken.
    async fn put_promo_code(&self, promo: PromoCode) -> Result<()>;

    /// Reserves capacity and records the booking as one atomic step.
    ///
    /// The slot's `available_spots` is decremented by `num_guests` only if
    /// it still holds at least that many; otherwise the call fails with
    /// `InsufficientCapacity` carrying the spots actually left, and nothing
    /// is written. The booking row is inserted in the same transaction, so
    /// a booking exists if and only if its capacity was taken.
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking>;

    /// Retrieves a booking by ID.
    async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>>;
}

/// Extension trait providing convenience methods for booking stores.
#[async_trait]
pub trait BookingStoreExt: BookingStore {
    /// Bookable slots of an experience from `today` onwards, soonest first.
    async fn upcoming_slots(
        &self,
        experience_id: ExperienceId,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Slot>> {
        self.query_slots(SlotQuery::upcoming(experience_id, today).limit(limit))
            .await
    }
}

// Blanket implementation for all BookingStore implementations
impl<T: BookingStore + ?Sized> BookingStoreExt for T {}
