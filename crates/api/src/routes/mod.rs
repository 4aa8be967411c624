//! HTTP route handlers and their wire types.

pub mod checkout;
pub mod confirmation;
pub mod experiences;
pub mod health;
pub mod metrics;

use booking_store::{Experience, Money, Slot};
use domain::PriceBreakdown;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;

/// An amount as integer cents plus its display form, e.g. `₹1000.00`.
#[derive(Debug, Serialize)]
pub struct MoneyResponse {
    pub cents: i64,
    pub display: String,
}

impl From<Money> for MoneyResponse {
    fn from(money: Money) -> Self {
        Self {
            cents: money.cents(),
            display: money.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct ExperienceResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: MoneyResponse,
    pub duration_hours: f64,
    pub rating: Option<f64>,
    pub review_count: u32,
    pub image_url: String,
    pub category: String,
    pub highlights: Vec<String>,
    pub included: Vec<String>,
}

impl From<Experience> for ExperienceResponse {
    fn from(e: Experience) -> Self {
        Self {
            id: e.id.to_string(),
            title: e.title,
            description: e.description,
            location: e.location,
            price: e.price.into(),
            duration_hours: e.duration_hours,
            rating: e.rating,
            review_count: e.review_count,
            image_url: e.image_url,
            category: e.category,
            highlights: e.highlights,
            included: e.included,
        }
    }
}

#[derive(Serialize)]
pub struct SlotResponse {
    pub id: String,
    pub experience_id: String,
    pub date: String,
    pub time: String,
    pub available_spots: u32,
    pub max_spots: u32,
}

impl From<Slot> for SlotResponse {
    fn from(s: Slot) -> Self {
        Self {
            id: s.id.to_string(),
            experience_id: s.experience_id.to_string(),
            date: s.date.format("%Y-%m-%d").to_string(),
            time: s.time.format("%H:%M").to_string(),
            available_spots: s.available_spots,
            max_spots: s.max_spots,
        }
    }
}

#[derive(Serialize)]
pub struct PriceBreakdownResponse {
    pub unit_price: MoneyResponse,
    pub guests: u32,
    pub subtotal: MoneyResponse,
    pub discount: MoneyResponse,
    pub total: MoneyResponse,
}

impl From<PriceBreakdown> for PriceBreakdownResponse {
    fn from(p: PriceBreakdown) -> Self {
        Self {
            unit_price: p.unit_price.into(),
            guests: p.guests,
            subtotal: p.subtotal.into(),
            discount: p.discount.into(),
            total: p.total.into(),
        }
    }
}

/// Parses a path or body identifier into one of the typed ids.
fn parse_id<T: From<Uuid>>(id: &str) -> Result<T, ApiError> {
    let uuid = Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;
    Ok(T::from(uuid))
}
