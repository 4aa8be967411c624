//! Upcoming slot availability for the slot picker.

use booking_store::{BookingStore, BookingStoreExt, ExperienceId, Slot};
use chrono::NaiveDate;

use crate::error::DomainError;

/// Default cap on the number of slots offered for one experience.
pub const DEFAULT_SLOT_LIMIT: usize = 20;

/// Service for listing bookable slots.
pub struct AvailabilityService<S: BookingStore> {
    store: S,
}

impl<S: BookingStore> AvailabilityService<S> {
    /// Creates a new availability service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists slots of an experience dated `today` or later that still have
    /// at least one spot, soonest first, at most `limit` of them.
    ///
    /// A failed fetch is an error, never an empty list.
    #[tracing::instrument(skip(self))]
    pub async fn list_upcoming_slots(
        &self,
        experience_id: ExperienceId,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Slot>, DomainError> {
        Ok(self
            .store
            .upcoming_slots(experience_id, today, limit)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use booking_store::{Experience, InMemoryBookingStore, Money};
    use chrono::NaiveTime;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn seeded() -> (InMemoryBookingStore, ExperienceId) {
        let store = InMemoryBookingStore::new();
        let exp = Experience::builder()
            .title("Paragliding")
            .location("Bir")
            .category("Adventure")
            .price(Money::from_units(3000))
            .duration_hours(1.0)
            .build()
            .unwrap();
        let id = exp.id;
        store.put_experience(exp).await.unwrap();

        // 25 bookable days plus one past and one full slot.
        for day in 1..=25 {
            let d = date("2030-05-01") + chrono::Days::new(day);
            let slot = Slot::new(id, d, NaiveTime::from_hms_opt(7, 0, 0).unwrap(), 4).unwrap();
            store.put_slot(slot).await.unwrap();
        }
        let past = Slot::new(id, date("2030-04-01"), NaiveTime::from_hms_opt(6, 0, 0).unwrap(), 4).unwrap();
        store.put_slot(past).await.unwrap();
        let full = Slot::new(id, date("2030-05-02"), NaiveTime::from_hms_opt(6, 0, 0).unwrap(), 4)
            .unwrap()
            .with_available_spots(0)
            .unwrap();
        store.put_slot(full).await.unwrap();

        (store, id)
    }

    #[tokio::test]
    async fn upcoming_slots_are_future_open_sorted_and_capped() {
        let (store, id) = seeded().await;
        let service = AvailabilityService::new(store);
        let today = date("2030-05-01");

        let slots = service
            .list_upcoming_slots(id, today, DEFAULT_SLOT_LIMIT)
            .await
            .unwrap();

        assert_eq!(slots.len(), DEFAULT_SLOT_LIMIT);
        assert!(slots.iter().all(|s| s.date >= today && s.available_spots > 0));
        assert!(
            slots
                .windows(2)
                .all(|w| (w[0].date, w[0].time) <= (w[1].date, w[1].time))
        );
    }

    #[tokio::test]
    async fn fetch_failure_is_distinct_from_empty() {
        let (store, id) = seeded().await;
        let service = AvailabilityService::new(store.clone());

        let none = service
            .list_upcoming_slots(id, date("2031-01-01"), DEFAULT_SLOT_LIMIT)
            .await
            .unwrap();
        assert!(none.is_empty());

        store.set_unavailable(true);
        let failed = service
            .list_upcoming_slots(id, date("2030-05-01"), DEFAULT_SLOT_LIMIT)
            .await;
        assert!(matches!(failed, Err(DomainError::StoreUnavailable(_))));
    }
}
