use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Routes mounted at `/orders`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::orders::list).post(handlers::orders::create),
        )
        .route(
            "/{order}",
            get(handlers::orders::get_by_id)
                .put(handlers::orders::update)
                .delete(handlers::orders::delete),
        )
        .route("/{order}/semaforo", get(handlers::lifecycle::get_semaforo))
        .route(
            "/{order}/save-semaforo",
            post(handlers::lifecycle::save_semaforo),
        )
        .route(
            "/{order}/change-status",
            post(handlers::lifecycle::change_status),
        )
        .route(
            "/{order}/allowed-statuses",
            get(handlers::lifecycle::allowed_statuses),
        )
}
