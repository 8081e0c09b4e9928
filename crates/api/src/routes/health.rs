//! Liveness endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::restaurants::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Backend serving lookups: `postgres`, `dynamodb` or `memory`.
    pub backend: String,
}

/// GET /health — reports that the server is up. The backend is not contacted.
pub async fn check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        backend: state.lookup.backend_kind().to_string(),
    })
}
