//! Integration tests for the booking and pricing core.
//!
//! These run the full storefront flow against the in-memory store: listing,
//! slot picking, checkout with promo codes, booking and confirmation.

use booking_store::{
    BookingStore, DiscountRule, Experience, ExperienceId, InMemoryBookingStore, Money, Percent,
    PromoCode, Slot, SlotId,
};
use chrono::{NaiveDate, NaiveTime};
use domain::{
    AvailabilityService, BookingService, CatalogService, Checkout, ConfirmationAssembler, Contact,
    CreateBooking, DEFAULT_SLOT_LIMIT, DomainError, PromoValidator,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()
}

fn contact() -> Contact {
    Contact::new("Ananya Rao", "ananya@example.com", "+91 98450 00000")
}

/// Seeds one experience priced at 500 with a single slot of the given
/// capacity, plus the SAVE10 and FLAT2000 promo codes.
async fn seeded(spots: u32) -> (InMemoryBookingStore, ExperienceId, SlotId) {
    let store = InMemoryBookingStore::new();
    let exp = Experience::builder()
        .title("Backwater Cruise")
        .location("Alleppey")
        .category("Water")
        .price(Money::from_units(500))
        .duration_hours(4.0)
        .rating(4.8, 120)
        .build()
        .unwrap();
    let slot = Slot::new(
        exp.id,
        today(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        spots,
    )
    .unwrap();
    let ids = (exp.id, slot.id);

    store.put_experience(exp).await.unwrap();
    store.put_slot(slot).await.unwrap();
    store
        .put_promo_code(
            PromoCode::new(
                "SAVE10",
                DiscountRule::Percentage(Percent::from_whole(10).unwrap()),
                Money::from_units(500),
            )
            .unwrap(),
        )
        .await
        .unwrap();
    store
        .put_promo_code(
            PromoCode::new(
                "FLAT2000",
                DiscountRule::Fixed(Money::from_units(2000)),
                Money::zero(),
            )
            .unwrap(),
        )
        .await
        .unwrap();

    (store, ids.0, ids.1)
}

mod storefront_flow {
    use super::*;

    #[tokio::test]
    async fn list_pick_checkout_book_confirm() {
        let (store, exp_id, slot_id) = seeded(3).await;

        let listed = CatalogService::new(store.clone())
            .list_experiences()
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, exp_id);

        let slots = AvailabilityService::new(store.clone())
            .list_upcoming_slots(exp_id, today(), DEFAULT_SLOT_LIMIT)
            .await
            .unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].id, slot_id);

        let validator = PromoValidator::new(store.clone());
        let mut checkout = Checkout::load(&store, slot_id).await.unwrap();
        checkout.set_guest_count(2).unwrap();
        checkout.apply_promo(&validator, "save10").await.unwrap();
        assert_eq!(checkout.breakdown().total, Money::from_units(900));

        let booking = BookingService::new(store.clone())
            .create_booking(checkout.into_command(contact()))
            .await
            .unwrap();

        let confirmation = ConfirmationAssembler::new(store.clone())
            .get_confirmation(booking.id)
            .await
            .unwrap();
        assert_eq!(confirmation.experience.id, exp_id);
        assert_eq!(confirmation.slot.available_spots, 1);
        assert_eq!(confirmation.original_amount(), Money::from_units(1000));
        assert_eq!(confirmation.discount(), Some(Money::from_units(100)));
        assert_eq!(confirmation.booking.user_name, "Ananya Rao");
    }

    #[tokio::test]
    async fn last_spots_disappear_from_listing() {
        let (store, exp_id, slot_id) = seeded(2).await;

        BookingService::new(store.clone())
            .create_booking(CreateBooking::new(slot_id, 2, contact()))
            .await
            .unwrap();

        let slots = AvailabilityService::new(store)
            .list_upcoming_slots(exp_id, today(), DEFAULT_SLOT_LIMIT)
            .await
            .unwrap();
        assert!(slots.is_empty());
    }
}

mod pricing_properties {
    use super::*;

    #[tokio::test]
    async fn total_plus_discount_is_subtotal() {
        for (guests, code) in [(1, None), (2, Some("SAVE10")), (3, Some("FLAT2000"))] {
            let (store, _, slot_id) = seeded(5).await;
            let validator = PromoValidator::new(store.clone());
            let mut checkout = Checkout::load(&store, slot_id).await.unwrap();
            checkout.set_guest_count(guests).unwrap();
            if let Some(code) = code {
                checkout.apply_promo(&validator, code).await.unwrap();
            }

            let booking = BookingService::new(store.clone())
                .create_booking(checkout.into_command(contact()))
                .await
                .unwrap();

            assert_eq!(
                booking.total_price + booking.discount_amount,
                Money::from_units(500).multiply(guests)
            );
            assert!(!booking.total_price.is_negative());
        }
    }

    #[tokio::test]
    async fn oversized_fixed_discount_books_for_free() {
        let (store, _, slot_id) = seeded(5).await;
        let validator = PromoValidator::new(store.clone());
        let promo = validator
            .apply_promo("FLAT2000", Money::from_units(1000))
            .await
            .unwrap();

        let booking = BookingService::new(store)
            .create_booking(CreateBooking::new(slot_id, 2, contact()).with_promo(promo))
            .await
            .unwrap();
        assert_eq!(booking.total_price, Money::zero());
        assert_eq!(booking.discount_amount, Money::from_units(1000));
    }

    #[tokio::test]
    async fn minimum_order_reported() {
        let (store, _, _) = seeded(5).await;
        let result = PromoValidator::new(store)
            .apply_promo("SAVE10", Money::from_units(400))
            .await;
        match result {
            Err(DomainError::BelowMinimumOrder { minimum }) => {
                assert_eq!(minimum, Money::from_units(500));
            }
            other => panic!("expected BelowMinimumOrder, got {other:?}"),
        }
    }
}

mod capacity {
    use super::*;

    #[tokio::test]
    async fn spots_never_go_negative() {
        let (store, _, slot_id) = seeded(3).await;
        let service = BookingService::new(store.clone());

        for guests in [2, 2, 1, 1] {
            let _ = service
                .create_booking(CreateBooking::new(slot_id, guests, contact()))
                .await;
        }

        let slot = store.get_slot(slot_id).await.unwrap().unwrap();
        assert_eq!(slot.available_spots, 0);
        assert_eq!(store.booking_count().await, 2);
    }

    #[tokio::test]
    async fn racing_for_last_spot_books_once() {
        let (store, _, slot_id) = seeded(1).await;
        let first = BookingService::new(store.clone());
        let second = BookingService::new(store.clone());

        let (a, b) = tokio::join!(
            first.create_booking(CreateBooking::new(slot_id, 1, contact())),
            second.create_booking(CreateBooking::new(slot_id, 1, contact())),
        );

        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        let failure = if a.is_err() { a } else { b };
        assert!(matches!(
            failure,
            Err(DomainError::InsufficientCapacity { available: 0 })
        ));
        assert_eq!(store.booking_count().await, 1);
    }

    #[tokio::test]
    async fn booking_under_outage_fails_cleanly() {
        let (store, _, slot_id) = seeded(3).await;
        store.set_unavailable(true);

        let result = BookingService::new(store.clone())
            .create_booking(CreateBooking::new(slot_id, 1, contact()))
            .await;
        assert!(matches!(result, Err(DomainError::StoreUnavailable(_))));

        store.set_unavailable(false);
        assert_eq!(store.booking_count().await, 0);
    }
}
