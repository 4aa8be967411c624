//! Booking confirmation endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use booking_store::{BookingId, BookingStore};
use serde::Serialize;

use super::checkout::BookingResponse;
use super::{ExperienceResponse, MoneyResponse, SlotResponse, parse_id};
use crate::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct ConfirmationResponse {
    pub booking: BookingResponse,
    pub slot: SlotResponse,
    pub experience: ExperienceResponse,
    pub original_amount: MoneyResponse,
    /// Present only when a discount was granted.
    pub discount: Option<MoneyResponse>,
    pub total: MoneyResponse,
}

/// GET /bookings/:id/confirmation: booking joined with slot and experience.
#[tracing::instrument(skip(state))]
pub async fn get<S: BookingStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ConfirmationResponse>, ApiError> {
    let id: BookingId = parse_id(&id)?;
    let confirmation = state.confirmations.get_confirmation(id).await?;

    let original_amount = confirmation.original_amount().into();
    let discount = confirmation.discount().map(Into::into);
    let total = confirmation.booking.total_price.into();

    Ok(Json(ConfirmationResponse {
        booking: confirmation.booking.into(),
        slot: confirmation.slot.into(),
        experience: confirmation.experience.into(),
        original_amount,
        discount,
        total,
    }))
}
