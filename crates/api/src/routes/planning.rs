use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Routes mounted at `/api/planning`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/force-reschedule",
        post(handlers::planning::force_reschedule),
    )
}
