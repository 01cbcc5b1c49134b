pub mod health;
pub mod orders;
pub mod planning;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /orders                                list (?status=n), create
/// /orders/{order}                        get, update, delete
/// /orders/{order}/semaforo               current readiness triple
/// /orders/{order}/save-semaforo          save readiness triple (POST)
/// /orders/{order}/change-status          change status (POST)
/// /orders/{order}/allowed-statuses       reachable statuses
///
/// /api/planning/force-reschedule         proxy to the planning service (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/orders", orders::router())
        .nest("/api/planning", planning::router())
}
