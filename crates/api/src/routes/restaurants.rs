//! Restaurant count endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use restaurant_store::{Count, RestaurantCountLookup, RestaurantName, RestaurantStoreError};
use serde::Serialize;

use crate::error::ApiError;

/// Restaurants listed on the Yelb voting page, in display order.
pub const VOTE_RESTAURANTS: [&str; 4] = ["outback", "bucadibeppo", "ihop", "chipotle"];

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub lookup: RestaurantCountLookup,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub name: String,
    pub value: u64,
}

/// GET /api/restaurants/{name}/count — the count as plain decimal text.
#[tracing::instrument(skip(state))]
pub async fn count(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let count = state.lookup.lookup_count(&name).await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], count))
}

/// GET /api/getvotes — counts for every restaurant on the voting page.
///
/// A restaurant with no row yet is reported with zero votes.
#[tracing::instrument(skip(state))]
pub async fn votes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<VoteResponse>>, ApiError> {
    let mut votes = Vec::with_capacity(VOTE_RESTAURANTS.len());

    for restaurant in VOTE_RESTAURANTS {
        let name = RestaurantName::new(restaurant).map_err(RestaurantStoreError::from)?;
        let count = match state.lookup.lookup(&name).await {
            Ok(count) => count,
            Err(RestaurantStoreError::NotFound(_)) => Count::default(),
            Err(e) => return Err(e.into()),
        };
        votes.push(VoteResponse {
            name: name.into(),
            value: count.value(),
        });
    }

    Ok(Json(votes))
}
