//! Shared types used across the booking workspace.

pub mod money;
pub mod types;

pub use money::{Money, Percent};
pub use types::{BookingId, ExperienceId, SlotId};
