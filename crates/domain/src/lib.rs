//! Booking and pricing core.
//!
//! This crate provides the domain services behind the storefront:
//! - Catalog listing and experience detail
//! - Upcoming slot availability
//! - Promo code validation and discount computation
//! - Capacity-checked booking creation
//! - Confirmation assembly for a persisted booking
//!
//! Every service owns a [`BookingStore`] handle and re-reads from it on
//! each call; nothing is cached between calls.

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod checkout;
pub mod confirmation;
pub mod error;
pub mod pricing;
pub mod promo;

pub use availability::{AvailabilityService, DEFAULT_SLOT_LIMIT};
pub use booking::{BookingService, Contact, CreateBooking};
pub use booking_store::BookingStore;
pub use catalog::CatalogService;
pub use checkout::Checkout;
pub use confirmation::{Confirmation, ConfirmationAssembler};
pub use error::DomainError;
pub use pricing::PriceBreakdown;
pub use promo::{AppliedPromo, PromoValidator, compute_discount};
