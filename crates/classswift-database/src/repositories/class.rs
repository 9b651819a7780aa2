//! Class repository implementation.

use sqlx::PgPool;

use classswift_core::error::{AppError, ErrorKind};
use classswift_core::result::AppResult;
use classswift_entity::class::model::Class;

/// Repository for class lookup operations.
#[derive(Debug, Clone)]
pub struct ClassRepository {
    pool: PgPool,
}

impl ClassRepository {
    /// Create a new class repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a class by its public identifier.
    pub async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Class>> {
        sqlx::query_as::<_, Class>("SELECT * FROM classes WHERE public_id = $1")
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find class", e))
    }

    /// List all classes.
    pub async fn find_all(&self) -> AppResult<Vec<Class>> {
        sqlx::query_as::<_, Class>("SELECT * FROM classes ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list classes", e))
    }

    /// Find a class by public identifier inside a transaction.
    pub async fn find_by_public_id_tx(
        conn: &mut sqlx::PgConnection,
        public_id: &str,
    ) -> AppResult<Option<Class>> {
        sqlx::query_as::<_, Class>("SELECT * FROM classes WHERE public_id = $1")
            .bind(public_id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find class", e))
    }
}
