use std::sync::Arc;

use ordini_core::lifecycle::OrderLifecycle;
use ordini_core::store::OrderStore;
use ordini_planning::Rescheduler;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is behind an `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Order persistence (Postgres or in-memory).
    pub orders: Arc<dyn OrderStore>,
    /// Lifecycle controller over the same store.
    pub lifecycle: OrderLifecycle,
    /// Client of the external planning service.
    pub planner: Arc<dyn Rescheduler>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Database pool, present only when running on Postgres. Used by health checks.
    pub pool: Option<ordini_db::DbPool>,
}

impl AppState {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        planner: Arc<dyn Rescheduler>,
        config: ServerConfig,
        pool: Option<ordini_db::DbPool>,
    ) -> Self {
        Self {
            lifecycle: OrderLifecycle::new(Arc::clone(&orders)),
            orders,
            planner,
            config: Arc::new(config),
            pool,
        }
    }
}
