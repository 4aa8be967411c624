use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    Booking, BookingId, Experience, ExperienceId, NewBooking, PromoCode, Result, Slot, SlotId,
    SlotQuery, StoreError, normalize_code, store::BookingStore,
};

#[derive(Debug, Default)]
struct Tables {
    experiences: HashMap<ExperienceId, Experience>,
    slots: HashMap<SlotId, Slot>,
    promo_codes: HashMap<String, PromoCode>,
    bookings: HashMap<BookingId, Booking>,
}

/// In-memory booking store implementation for testing and local runs.
///
/// All four tables sit behind a single lock, so `create_booking` sees and
/// mutates capacity atomically, the same guarantee the PostgreSQL
/// implementation gets from its transaction.
#[derive(Clone, Default)]
pub struct InMemoryBookingStore {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryBookingStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates an outage: while set, every call fails with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, AtomicOrdering::SeqCst);
    }

    /// Returns the total number of bookings stored.
    pub async fn booking_count(&self) -> usize {
        self.tables.read().await.bookings.len()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

/// Highest rating first, unrated last.
fn by_rating_desc(a: &Experience, b: &Experience) -> Ordering {
    match (a.rating, b.rating) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn list_experiences(&self) -> Result<Vec<Experience>> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        let mut experiences: Vec<_> = tables.experiences.values().cloned().collect();
        experiences.sort_by(by_rating_desc);
        Ok(experiences)
    }

    async fn get_experience(&self, id: ExperienceId) -> Result<Option<Experience>> {
        self.ensure_available()?;
        Ok(self.tables.read().await.experiences.get(&id).cloned())
    }

    async fn put_experience(&self, experience: Experience) -> Result<()> {
        self.ensure_available()?;
        experience.validate()?;
        let mut tables = self.tables.write().await;
        if tables.experiences.contains_key(&experience.id) {
            return Err(StoreError::Duplicate(format!(
                "experience {}",
                experience.id
            )));
        }
        tables.experiences.insert(experience.id, experience);
        Ok(())
    }

    async fn query_slots(&self, query: SlotQuery) -> Result<Vec<Slot>> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        let mut slots: Vec<_> = tables
            .slots
            .values()
            .filter(|s| query.matches(s))
            .cloned()
            .collect();

        slots.sort_by(|a, b| a.date.cmp(&b.date).then(a.time.cmp(&b.time)));

        if let Some(limit) = query.limit {
            slots.truncate(limit);
        }
        Ok(slots)
    }

    async fn get_slot(&self, id: SlotId) -> Result<Option<Slot>> {
        self.ensure_available()?;
        Ok(self.tables.read().await.slots.get(&id).cloned())
    }

    async fn put_slot(&self, slot: Slot) -> Result<()> {
        self.ensure_available()?;
        slot.validate()?;
        let mut tables = self.tables.write().await;
        if !tables.experiences.contains_key(&slot.experience_id) {
            return Err(StoreError::InvalidRecord(format!(
                "slot {} references unknown experience {}",
                slot.id, slot.experience_id
            )));
        }
        if tables.slots.contains_key(&slot.id) {
            return Err(StoreError::Duplicate(format!("slot {}", slot.id)));
        }
        tables.slots.insert(slot.id, slot);
        Ok(())
    }

    async fn find_active_promo_code(&self, code: &str) -> Result<Option<PromoCode>> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .promo_codes
            .get(&normalize_code(code))
            .filter(|p| p.active)
            .cloned())
    }

    async fn put_promo_code(&self, promo: PromoCode) -> Result<()> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        if tables.promo_codes.contains_key(&promo.code) {
            return Err(StoreError::Duplicate(format!("promo code {}", promo.code)));
        }
        tables.promo_codes.insert(promo.code.clone(), promo);
        Ok(())
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking> {
        self.ensure_available()?;
        booking.validate()?;

        let mut tables = self.tables.write().await;
        let slot_id = booking.slot_id;
        let requested = booking.num_guests;

        let slot = tables
            .slots
            .get_mut(&slot_id)
            .ok_or(StoreError::SlotNotFound(slot_id))?;

        // Conditional decrement: only proceeds while enough spots remain.
        if slot.available_spots < requested {
            return Err(StoreError::InsufficientCapacity {
                slot_id,
                requested,
                available: slot.available_spots,
            });
        }
        slot.available_spots -= requested;

        let row = booking.into_booking(Utc::now());
        tables.bookings.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>> {
        self.ensure_available()?;
        Ok(self.tables.read().await.bookings.get(&id).cloned())
    }
}
