//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request from the client.
    BadRequest(String),
    /// Domain logic error.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
        };

        metrics::counter!("http_errors_total", "status" => status.as_u16().to_string())
            .increment(1);
        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    let status = status_for(&err);
    match status {
        StatusCode::INTERNAL_SERVER_ERROR => {
            tracing::error!(error = ?err, "internal server error");
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            tracing::warn!(error = ?err, "booking store unavailable");
        }
        _ => {}
    }
    (status, err.to_string())
}

fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::InvalidPromoCode { .. }
        | DomainError::BelowMinimumOrder { .. }
        | DomainError::InvalidContact { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::InsufficientCapacity { .. } | DomainError::StalePromo { .. } => {
            StatusCode::CONFLICT
        }
        DomainError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

#[cfg(test)]
mod tests {
    use booking_store::{Money, StoreError};

    use super::*;

    #[test]
    fn statuses() {
        let cases = [
            (
                DomainError::InvalidPromoCode {
                    code: "X".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DomainError::BelowMinimumOrder {
                    minimum: Money::from_units(500),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DomainError::InsufficientCapacity { available: 2 },
                StatusCode::CONFLICT,
            ),
            (
                DomainError::StoreUnavailable(StoreError::Unavailable("down".to_string())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DomainError::PersistenceError(StoreError::InvalidRecord("bad".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(status_for(&err), expected, "{err}");
        }
    }
}
