//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use classswift_core::config::AppConfig;
use classswift_realtime::hub::HubHandle;
use classswift_service::class::service::ClassService;
use classswift_service::join::service::JoinService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Producer handle to the session broadcast hub.
    pub hub: HubHandle,
    /// Class and roster queries.
    pub class_service: Arc<ClassService>,
    /// Seat assignment transactions.
    pub join_service: Arc<JoinService>,
}
