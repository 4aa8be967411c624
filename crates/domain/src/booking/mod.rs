//! Capacity-checked booking creation.

mod commands;
mod service;

pub use commands::{Contact, CreateBooking};
pub use service::BookingService;
