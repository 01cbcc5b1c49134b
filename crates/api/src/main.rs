use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ordini_core::memory::MemoryOrderStore;
use ordini_core::store::OrderStore;
use ordini_db::{DbPool, PgOrderStore};
use ordini_planning::PlanningClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ordini_api::config::{LogFormat, ServerConfig};
use ordini_api::router::build_app_router;
use ordini_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env();

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Order store ---
    let (orders, pool): (Arc<dyn OrderStore>, Option<DbPool>) = match &config.database_url {
        Some(database_url) => {
            let pool = ordini_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            ordini_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            ordini_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            (Arc::new(PgOrderStore::new(pool.clone())), Some(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, orders are kept in memory and lost on restart");
            (Arc::new(MemoryOrderStore::new()), None)
        }
    };

    // --- Planning service client ---
    let planner = PlanningClient::new(
        &config.planning_url,
        Duration::from_secs(config.planning_timeout_secs),
    )
    .expect("Failed to build planning service client");
    tracing::info!(url = %planner.base_url(), "Planning service client ready");

    // --- App state and router ---
    let state = AppState::new(orders, Arc::new(planner), config.clone(), pool.clone());
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }
    tracing::info!("Graceful shutdown complete");
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter; `LOG_FORMAT=json` switches to
/// one JSON object per event.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "ordini_api=debug,ordini_core=debug,ordini_planning=debug,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
