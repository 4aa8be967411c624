//! Read-only access to the experience catalog.

use booking_store::{BookingStore, Experience, ExperienceId};

use crate::error::DomainError;

/// Service for browsing experiences.
pub struct CatalogService<S: BookingStore> {
    store: S,
}

impl<S: BookingStore> CatalogService<S> {
    /// Creates a new catalog service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists every experience, highest rated first.
    #[tracing::instrument(skip(self))]
    pub async fn list_experiences(&self) -> Result<Vec<Experience>, DomainError> {
        Ok(self.store.list_experiences().await?)
    }

    /// Loads a single experience for its detail page.
    #[tracing::instrument(skip(self))]
    pub async fn get_experience(&self, id: ExperienceId) -> Result<Experience, DomainError> {
        self.store
            .get_experience(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Experience", id))
    }
}

#[cfg(test)]
mod tests {
    use booking_store::{InMemoryBookingStore, Money};

    use super::*;

    fn experience(title: &str, rating: f64) -> Experience {
        Experience::builder()
            .title(title)
            .location("Munnar")
            .category("Nature")
            .price(Money::from_units(800))
            .duration_hours(4.0)
            .rating(rating, 20)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn lists_by_rating_desc() {
        let store = InMemoryBookingStore::new();
        for (title, rating) in [("Tea walk", 4.2), ("Waterfall", 4.8), ("Spice farm", 3.9)] {
            store.put_experience(experience(title, rating)).await.unwrap();
        }
        let service = CatalogService::new(store);

        let experiences = service.list_experiences().await.unwrap();
        let ratings: Vec<_> = experiences.iter().filter_map(|e| e.rating).collect();
        assert_eq!(ratings, vec![4.8, 4.2, 3.9]);
    }

    #[tokio::test]
    async fn empty_catalog_is_not_an_error() {
        let service = CatalogService::new(InMemoryBookingStore::new());
        assert!(service.list_experiences().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_store_is_reported() {
        let store = InMemoryBookingStore::new();
        store.set_unavailable(true);
        let service = CatalogService::new(store);

        let result = service.list_experiences().await;
        assert!(matches!(result, Err(DomainError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn missing_experience_is_not_found() {
        let service = CatalogService::new(InMemoryBookingStore::new());
        let result = service.get_experience(ExperienceId::new()).await;
        assert!(matches!(
            result,
            Err(DomainError::NotFound {
                entity: "Experience",
                ..
            })
        ));
    }
}
