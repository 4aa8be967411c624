use booking_store::{
    BookingStore, DiscountRule, Experience, InMemoryBookingStore, Money, Percent, PromoCode, Slot,
    SlotId,
};
use chrono::{NaiveDate, NaiveTime};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{BookingService, Contact, CreateBooking, PromoValidator};

async fn seed(store: &InMemoryBookingStore, spots: u32) -> SlotId {
    let exp = Experience::builder()
        .title("Bench Trek")
        .location("Manali")
        .category("Adventure")
        .price(Money::from_units(1200))
        .duration_hours(6.0)
        .build()
        .unwrap();
    let slot = Slot::new(
        exp.id,
        NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(),
        NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        spots,
    )
    .unwrap();
    let slot_id = slot.id;
    store.put_experience(exp).await.unwrap();
    store.put_slot(slot).await.unwrap();
    store
        .put_promo_code(
            PromoCode::new(
                "BENCH15",
                DiscountRule::Percentage(Percent::from_whole(15).unwrap()),
                Money::from_units(1000),
            )
            .unwrap(),
        )
        .await
        .unwrap();
    slot_id
}

fn bench_apply_promo(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryBookingStore::new();
    rt.block_on(seed(&store, 10));
    let validator = PromoValidator::new(store);

    c.bench_function("domain/apply_promo", |b| {
        b.iter(|| {
            rt.block_on(async {
                validator
                    .apply_promo("bench15", Money::from_units(2400))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_create_booking(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryBookingStore::new();
    let slot_id = rt.block_on(seed(&store, u32::MAX / 2));
    let service = BookingService::new(store);

    c.bench_function("domain/create_booking", |b| {
        b.iter(|| {
            rt.block_on(async {
                let contact = Contact::new("Bench", "bench@example.com", "000");
                service
                    .create_booking(CreateBooking::new(slot_id, 1, contact))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_promo_then_book(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("domain/promo_then_book", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryBookingStore::new();
                let slot_id = seed(&store, 10).await;
                let validator = PromoValidator::new(store.clone());
                let service = BookingService::new(store);

                let promo = validator
                    .apply_promo("BENCH15", Money::from_units(2400))
                    .await
                    .unwrap();
                let contact = Contact::new("Bench", "bench@example.com", "000");
                service
                    .create_booking(CreateBooking::new(slot_id, 2, contact).with_promo(promo))
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_apply_promo,
    bench_create_booking,
    bench_promo_then_book,
);
criterion_main!(benches);
