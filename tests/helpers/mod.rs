//! Shared test helpers for integration tests.
//!
//! Database-backed tests only run when `CLASSSWIFT_TEST_DATABASE_URL`
//! points at a PostgreSQL instance; otherwise they skip. Every test seeds
//! its own class under a unique public id so suites can run in parallel
//! and be re-run against the same database.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use classswift_api::state::AppState;
use classswift_core::config::AppConfig;
use classswift_core::config::app::ServerConfig;
use classswift_core::config::database::DatabaseConfig;
use classswift_core::config::logging::LoggingConfig;
use classswift_core::config::realtime::RealtimeConfig;
use classswift_database::repositories::class::ClassRepository;
use classswift_database::repositories::seat::SeatAssignmentRepository;
use classswift_realtime::hub::{HubHandle, SessionHub};
use classswift_service::class::service::ClassService;
use classswift_service::join::service::JoinService;

/// Environment variable naming the test database.
pub const TEST_DB_ENV: &str = "CLASSSWIFT_TEST_DATABASE_URL";

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub db_pool: PgPool,
    /// Producer handle to the session hub.
    pub hub: HubHandle,
}

impl TestApp {
    /// Create a test application against the test database.
    ///
    /// Returns `None` (and the caller should skip) when no test database
    /// is configured.
    pub async fn try_new() -> Option<Self> {
        let url = match std::env::var(TEST_DB_ENV) {
            Ok(url) => url,
            Err(_) => {
                eprintln!("skipping: {TEST_DB_ENV} not set");
                return None;
            }
        };

        let db_pool = PgPool::connect(&url)
            .await
            .expect("Failed to connect to test database");

        classswift_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Some(Self::build(db_pool))
    }

    /// Create a test application over a lazy pool that never connects.
    ///
    /// Good enough for routes that do not touch the database.
    pub fn offline() -> Self {
        let db_pool =
            PgPool::connect_lazy("postgres://localhost:5432/classswift_void").expect("lazy pool");
        Self::build(db_pool)
    }

    fn build(db_pool: PgPool) -> Self {
        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 5,
                idle_timeout_seconds: 60,
            },
            realtime: RealtimeConfig::default(),
            logging: LoggingConfig::default(),
        };

        let class_repo = Arc::new(ClassRepository::new(db_pool.clone()));
        let seat_repo = Arc::new(SeatAssignmentRepository::new(db_pool.clone()));
        let class_service = Arc::new(ClassService::new(class_repo, seat_repo));
        let join_service = Arc::new(JoinService::new(db_pool.clone()));

        let (hub, hub_handle) = SessionHub::new(&config.realtime);
        tokio::spawn(hub.run());

        let state = AppState {
            config: Arc::new(config),
            db_pool: db_pool.clone(),
            hub: hub_handle.clone(),
            class_service,
            join_service,
        };

        Self {
            router: classswift_api::router::build_router(state),
            db_pool,
            hub: hub_handle,
        }
    }

    /// Insert a class for this test; safe to call across re-runs.
    pub async fn seed_class(&self, public_id: &str, is_active: bool) {
        sqlx::query(
            "INSERT INTO classes (id, public_id, name, total_capacity, is_active) \
             VALUES ($1, $2, $3, 30, $4) ON CONFLICT (id) DO NOTHING",
        )
        .bind(format!("class-{public_id}"))
        .bind(public_id)
        .bind(format!("Test Class {public_id}"))
        .bind(is_active)
        .execute(&self.db_pool)
        .await
        .expect("Failed to seed class");
    }

    /// Make an HTTP request to the test app.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request_with_headers(method, path, body, &[]).await
    }

    /// Make an HTTP request with extra headers.
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}
