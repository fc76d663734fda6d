//! Database connectivity probe
//!
//! GET /test-mongo - lists the collections of the backend database.
//! Read-only; a failing database maps to 503/500 via [`ApiError`].

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CollectionsResponse {
    pub collections: Vec<String>,
}

/// GET /test-mongo
async fn list_collections(
    State(state): State<AppState>,
) -> Result<Json<CollectionsResponse>, ApiError> {
    let collections = state.store().list_collection_names().await?;
    tracing::debug!(count = collections.len(), "listed collections");
    Ok(Json(CollectionsResponse { collections }))
}

/// Probe routes
pub fn router() -> Router<AppState> {
    Router::new().route("/test-mongo", get(list_collections))
}
