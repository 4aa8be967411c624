//! Catalog listing, experience detail and slot picker endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use booking_store::{BookingStore, ExperienceId};
use serde::Deserialize;

use super::{ExperienceResponse, SlotResponse, parse_id};
use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub limit: Option<usize>,
}

/// GET /experiences: all experiences, best rated first.
#[tracing::instrument(skip(state))]
pub async fn list<S: BookingStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<ExperienceResponse>>, ApiError> {
    let experiences = state.catalog.list_experiences().await?;
    Ok(Json(experiences.into_iter().map(Into::into).collect()))
}

/// GET /experiences/:id: a single experience.
#[tracing::instrument(skip(state))]
pub async fn get<S: BookingStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ExperienceResponse>, ApiError> {
    let id: ExperienceId = parse_id(&id)?;
    let experience = state.catalog.get_experience(id).await?;
    Ok(Json(experience.into()))
}

/// GET /experiences/:id/slots: upcoming slots with open spots.
///
/// "Upcoming" is relative to the current UTC date. The requested limit is
/// capped at the configured slot limit.
#[tracing::instrument(skip(state))]
pub async fn slots<S: BookingStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<SlotResponse>>, ApiError> {
    let id: ExperienceId = parse_id(&id)?;
    let limit = query
        .limit
        .unwrap_or(state.slot_limit)
        .min(state.slot_limit);

    // An unknown experience is a 404, not an empty picker
    state.catalog.get_experience(id).await?;

    let today = chrono::Utc::now().date_naive();
    let slots = state
        .availability
        .list_upcoming_slots(id, today, limit)
        .await?;
    Ok(Json(slots.into_iter().map(Into::into).collect()))
}
