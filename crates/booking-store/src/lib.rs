//! Storage layer for the booking core.
//!
//! The [`BookingStore`] trait is the only way the domain reaches persisted
//! data. Two implementations ship here: [`InMemoryBookingStore`] for tests
//! and the demo server, and [`PostgresBookingStore`] for production.

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod query;
pub mod store;

pub use common::{BookingId, ExperienceId, Money, Percent, SlotId};
pub use error::{Result, StoreError};
pub use memory::InMemoryBookingStore;
pub use models::{
    Booking, BookingStatus, DiscountRule, Experience, ExperienceBuilder, NewBooking, PromoCode,
    Slot, normalize_code,
};
pub use postgres::PostgresBookingStore;
pub use query::SlotQuery;
pub use store::{BookingStore, BookingStoreExt};
