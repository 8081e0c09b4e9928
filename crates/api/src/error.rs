//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use restaurant_store::RestaurantStoreError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Restaurant store error.
    Store(RestaurantStoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Store(err) => store_error_to_response(err),
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %message, "request failed");
        }

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn store_error_to_response(err: RestaurantStoreError) -> (StatusCode, String) {
    match &err {
        RestaurantStoreError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        RestaurantStoreError::InvalidName(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        RestaurantStoreError::ConnectionFailure(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        }
        RestaurantStoreError::DynamoDb(_) => (StatusCode::BAD_GATEWAY, err.to_string()),
        RestaurantStoreError::Configuration(_)
        | RestaurantStoreError::InvalidValue { .. }
        | RestaurantStoreError::Database(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<RestaurantStoreError> for ApiError {
    fn from(err: RestaurantStoreError) -> Self {
        ApiError::Store(err)
    }
}
