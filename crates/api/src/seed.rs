//! Demo catalog for running the server without a database.

use booking_store::{
    BookingStore, DiscountRule, Experience, Money, Percent, PromoCode, Result, Slot, StoreError,
};
use chrono::{Days, NaiveDate, NaiveTime};

/// Days of slots created ahead of `today`.
const DAYS_AHEAD: u64 = 14;

struct DemoExperience {
    title: &'static str,
    description: &'static str,
    location: &'static str,
    category: &'static str,
    price_units: i64,
    duration_hours: f64,
    rating: Option<(f64, u32)>,
    image_url: &'static str,
    highlights: &'static [&'static str],
    included: &'static [&'static str],
    /// Start times as (hour, minute) with the capacity of each slot.
    departures: &'static [(u32, u32, u32)],
}

const EXPERIENCES: &[DemoExperience] = &[
    DemoExperience {
        title: "Kayaking in the Mangroves",
        description: "Paddle through quiet mangrove channels at sunrise with a local guide.",
        location: "Goa",
        category: "Water",
        price_units: 999,
        duration_hours: 3.0,
        rating: Some((4.8, 214)),
        image_url: "https://images.example.com/kayak.jpg",
        highlights: &["Sunrise paddle", "Birdwatching", "Small groups"],
        included: &["Kayak and paddle", "Life jacket", "Guide"],
        departures: &[(6, 30, 8), (16, 0, 8)],
    },
    DemoExperience {
        title: "Old City Heritage Walk",
        description: "Walk the lanes of the old city and its stepwells with a historian.",
        location: "Jaipur",
        category: "Culture",
        price_units: 749,
        duration_hours: 2.5,
        rating: Some((4.6, 98)),
        image_url: "https://images.example.com/heritage.jpg",
        highlights: &["Stepwells", "Bazaar stops"],
        included: &["Guide", "Chai tasting"],
        departures: &[(8, 0, 15)],
    },
    DemoExperience {
        title: "Coffee Estate Trek",
        description: "A half-day trek through shade-grown coffee with a tasting at the end.",
        location: "Coorg",
        category: "Adventure",
        price_units: 1499,
        duration_hours: 5.0,
        rating: None,
        image_url: "https://images.example.com/coffee.jpg",
        highlights: &["Estate trails", "Waterfall stop"],
        included: &["Guide", "Lunch", "Coffee tasting"],
        departures: &[(7, 0, 12)],
    },
];

/// Loads the demo catalog: experiences, two weeks of slots from `today` and
/// the `WELCOME10` and `FLAT200` promo codes.
pub async fn seed_demo_data<S: BookingStore>(store: &S, today: NaiveDate) -> Result<()> {
    for demo in EXPERIENCES {
        let mut builder = Experience::builder()
            .title(demo.title)
            .description(demo.description)
            .location(demo.location)
            .category(demo.category)
            .price(Money::from_units(demo.price_units))
            .duration_hours(demo.duration_hours)
            .image_url(demo.image_url);
        if let Some((rating, reviews)) = demo.rating {
            builder = builder.rating(rating, reviews);
        }
        for highlight in demo.highlights {
            builder = builder.highlight(*highlight);
        }
        for item in demo.included {
            builder = builder.included(*item);
        }
        let experience = builder.build()?;
        let experience_id = experience.id;
        store.put_experience(experience).await?;

        for day in 0..DAYS_AHEAD {
            let Some(date) = today.checked_add_days(Days::new(day)) else {
                continue;
            };
            for &(hour, minute, spots) in demo.departures {
                let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) else {
                    continue;
                };
                store
                    .put_slot(Slot::new(experience_id, date, time, spots)?)
                    .await?;
            }
        }
    }

    let ten_percent = Percent::from_whole(10)
        .ok_or_else(|| StoreError::InvalidRecord("demo percentage out of range".to_string()))?;
    let promos = [
        PromoCode::new(
            "WELCOME10",
            DiscountRule::Percentage(ten_percent),
            Money::from_units(500),
        )?,
        PromoCode::new(
            "FLAT200",
            DiscountRule::Fixed(Money::from_units(200)),
            Money::from_units(1000),
        )?,
    ];
    for promo in promos {
        store.put_promo_code(promo).await?;
    }

    tracing::info!(
        experiences = EXPERIENCES.len(),
        days = DAYS_AHEAD,
        "seeded demo catalog"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use booking_store::{BookingStoreExt, InMemoryBookingStore};

    use super::*;

    #[tokio::test]
    async fn seeds_catalog_slots_and_promos() {
        let store = InMemoryBookingStore::new();
        let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        seed_demo_data(&store, today).await.unwrap();

        let experiences = store.list_experiences().await.unwrap();
        assert_eq!(experiences.len(), EXPERIENCES.len());
        assert_eq!(experiences[0].title, "Kayaking in the Mangroves");

        let slots = store
            .upcoming_slots(experiences[0].id, today, 100)
            .await
            .unwrap();
        assert_eq!(slots.len(), 28);

        assert!(
            store
                .find_active_promo_code("WELCOME10")
                .await
                .unwrap()
                .is_some()
        );
    }
}
