//! Read-only HTTP API for restaurant vote counts.
//!
//! Serves counts from the backend selected at startup, with structured
//! logging (tracing) on every request.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, Method, header};
use axum::routing::get;
use restaurant_store::RestaurantCountLookup;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::restaurants::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/hostname", get(routes::host::hostname))
        .route("/api/getvotes", get(routes::restaurants::votes))
        .route(
            "/api/restaurants/{name}/count",
            get(routes::restaurants::count),
        )
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers([
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::CONTENT_TYPE,
                    HeaderName::from_static("x-csrf-token"),
                    HeaderName::from_static("x-requested-with"),
                ]),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around a lookup.
pub fn create_state(lookup: RestaurantCountLookup) -> Arc<AppState> {
    Arc::new(AppState { lookup })
}
