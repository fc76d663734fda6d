//! Liveness endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Root response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub db_status: String,
}

/// GET /
///
/// Does not touch the database; `db_status` is the configured database name.
async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Backend is running",
        db_status: state.store().database_name().to_string(),
    })
}

/// Root routes
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn root_reports_database_name() {
        let state = AppState::new(Arc::new(MemoryStore::default()));
        let Json(body) = root(State(state)).await;
        assert_eq!(body.message, "Backend is running");
        assert_eq!(body.db_status, "resumematch");
    }

    #[tokio::test]
    async fn root_ignores_outage() {
        let store = MemoryStore::default();
        store.set_offline(true);
        let Json(body) = root(State(AppState::new(Arc::new(store)))).await;
        assert_eq!(body.db_status, "resumematch");
    }
}
