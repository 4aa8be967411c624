//! HTTP API server with observability for the experience booking core.
//!
//! Provides REST endpoints for browsing experiences, picking slots, pricing
//! a checkout with promo codes, booking, and reading confirmations, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use booking_store::BookingStore;
use domain::{
    AvailabilityService, BookingService, CatalogService, ConfirmationAssembler, PromoValidator,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<S: BookingStore> {
    pub catalog: CatalogService<S>,
    pub availability: AvailabilityService<S>,
    pub promos: PromoValidator<S>,
    pub bookings: BookingService<S>,
    pub confirmations: ConfirmationAssembler<S>,
    pub store: S,
    /// Most slots listed per experience.
    pub slot_limit: usize,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: BookingStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/experiences", get(routes::experiences::list::<S>))
        .route("/experiences/{id}", get(routes::experiences::get::<S>))
        .route("/experiences/{id}/slots", get(routes::experiences::slots::<S>))
        .route("/promo-codes/apply", post(routes::checkout::apply_promo::<S>))
        .route("/checkout/quote", post(routes::checkout::quote::<S>))
        .route("/bookings", post(routes::checkout::create_booking::<S>))
        .route(
            "/bookings/{id}/confirmation",
            get(routes::confirmation::get::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state, every service sharing one store handle.
pub fn create_default_state<S: BookingStore + Clone + 'static>(
    store: S,
    slot_limit: usize,
) -> Arc<AppState<S>> {
    Arc::new(AppState {
        catalog: CatalogService::new(store.clone()),
        availability: AvailabilityService::new(store.clone()),
        promos: PromoValidator::new(store.clone()),
        bookings: BookingService::new(store.clone()),
        confirmations: ConfirmationAssembler::new(store.clone()),
        store,
        slot_limit,
    })
}
