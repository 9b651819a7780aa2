//! ClassSwift Server — classroom session backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use classswift_api::state::AppState;
use classswift_core::config::AppConfig;
use classswift_core::error::AppError;
use classswift_database::connection::DatabasePool;
use classswift_database::repositories::class::ClassRepository;
use classswift_database::repositories::seat::SeatAssignmentRepository;
use classswift_realtime::hub::SessionHub;
use classswift_service::class::service::ClassService;
use classswift_service::join::service::JoinService;

#[tokio::main]
async fn main() {
    let env = std::env::var("CLASSSWIFT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ClassSwift v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    classswift_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories and services ────────────────────────
    let class_repo = Arc::new(ClassRepository::new(db.pool().clone()));
    let seat_repo = Arc::new(SeatAssignmentRepository::new(db.pool().clone()));

    let class_service = Arc::new(ClassService::new(class_repo, seat_repo));
    let join_service = Arc::new(JoinService::new(db.pool().clone()));

    // ── Step 3: Session broadcast hub ─────────────────────────────
    let (hub, hub_handle) = SessionHub::new(&config.realtime);
    let hub_task = tokio::spawn(hub.run());

    // ── Step 4: Build and start HTTP server ───────────────────────
    let app_state = AppState {
        config: Arc::new(config.clone()),
        db_pool: db.pool().clone(),
        hub: hub_handle,
        class_service,
        join_service,
    };

    let app = classswift_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ClassSwift server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Graceful shutdown ─────────────────────────────────
    tracing::info!("Shutdown signal received, stopping...");
    hub_task.abort();
    db.close().await;

    tracing::info!("ClassSwift server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
