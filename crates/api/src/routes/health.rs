use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status: `ok` or `degraded`.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Backing order store: `postgres` or `memory`.
    pub store: &'static str,
    /// Whether the database is reachable. Absent on the in-memory store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_healthy: Option<bool>,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (store, db_healthy) = match &state.pool {
        Some(pool) => ("postgres", Some(ordini_db::health_check(pool).await.is_ok())),
        None => ("memory", None),
    };

    let status = if db_healthy == Some(false) {
        "degraded"
    } else {
        "ok"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store,
        db_healthy,
    })
}

/// Mount health check routes at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
