//! Promo code, checkout summary and booking endpoints.
//!
//! Prices are always recomputed here from the stored experience price; a
//! client-side total is never trusted. Promo codes submitted with a booking
//! are validated again against the subtotal at submission time.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use booking_store::{Booking, BookingStore, Money, SlotId};
use domain::{AppliedPromo, Checkout, Contact};
use serde::{Deserialize, Serialize};

use super::{MoneyResponse, PriceBreakdownResponse, parse_id};
use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct ApplyPromoRequest {
    pub code: String,
    pub subtotal_cents: i64,
}

#[derive(Deserialize)]
pub struct QuoteRequest {
    pub slot_id: String,
    pub guests: u32,
    pub promo_code: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub slot_id: String,
    pub guests: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub promo_code: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct AppliedPromoResponse {
    pub code: String,
    pub subtotal: MoneyResponse,
    pub discount: MoneyResponse,
    pub total: MoneyResponse,
}

impl From<&AppliedPromo> for AppliedPromoResponse {
    fn from(p: &AppliedPromo) -> Self {
        Self {
            code: p.code().to_string(),
            subtotal: p.subtotal().into(),
            discount: p.discount().into(),
            total: (p.subtotal() - p.discount()).into(),
        }
    }
}

#[derive(Serialize)]
pub struct QuoteResponse {
    pub slot_id: String,
    pub experience_title: String,
    pub promo_code: Option<String>,
    pub price: PriceBreakdownResponse,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub slot_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub num_guests: u32,
    pub total_price: MoneyResponse,
    pub promo_code: Option<String>,
    pub discount_amount: MoneyResponse,
    pub status: String,
    pub created_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id.to_string(),
            slot_id: b.slot_id.to_string(),
            user_name: b.user_name,
            user_email: b.user_email,
            user_phone: b.user_phone,
            num_guests: b.num_guests,
            total_price: b.total_price.into(),
            promo_code: b.promo_code,
            discount_amount: b.discount_amount.into(),
            status: b.status.as_str().to_string(),
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /promo-codes/apply: validate a code against a subtotal.
#[tracing::instrument(skip(state, req))]
pub async fn apply_promo<S: BookingStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<ApplyPromoRequest>,
) -> Result<Json<AppliedPromoResponse>, ApiError> {
    if req.subtotal_cents < 0 {
        return Err(ApiError::BadRequest(
            "subtotal_cents must not be negative".to_string(),
        ));
    }

    let applied = state
        .promos
        .apply_promo(&req.code, Money::from_cents(req.subtotal_cents))
        .await?;
    Ok(Json((&applied).into()))
}

/// POST /checkout/quote: the checkout summary for a slot and guest count.
#[tracing::instrument(skip(state, req))]
pub async fn quote<S: BookingStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let slot_id: SlotId = parse_id(&req.slot_id)?;
    let checkout = prepare_checkout(&state, slot_id, req.guests, req.promo_code.as_deref()).await?;

    Ok(Json(QuoteResponse {
        slot_id: slot_id.to_string(),
        experience_title: checkout.experience().title.clone(),
        promo_code: checkout.promo().map(|p| p.code().to_string()),
        price: checkout.breakdown().into(),
    }))
}

/// POST /bookings: create a confirmed booking.
#[tracing::instrument(skip(state, req))]
pub async fn create_booking<S: BookingStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let slot_id: SlotId = parse_id(&req.slot_id)?;
    let contact = Contact::new(req.name, req.email, req.phone).validated()?;

    let checkout = prepare_checkout(&state, slot_id, req.guests, req.promo_code.as_deref()).await?;
    let booking = state
        .bookings
        .create_booking(checkout.into_command(contact))
        .await?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// Loads a fresh checkout, sets the guest count and applies a non-blank
/// promo code.
async fn prepare_checkout<S: BookingStore + Clone + 'static>(
    state: &AppState<S>,
    slot_id: SlotId,
    guests: u32,
    promo_code: Option<&str>,
) -> Result<Checkout, ApiError> {
    let mut checkout = Checkout::load(&state.store, slot_id).await?;
    checkout.set_guest_count(guests)?;
    if let Some(code) = promo_code
        && !code.trim().is_empty()
    {
        checkout.apply_promo(&state.promos, code).await?;
    }
    Ok(checkout)
}
