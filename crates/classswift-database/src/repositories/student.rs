//! Student repository implementation.

use sqlx::{PgConnection, PgPool};

use classswift_core::error::{AppError, ErrorKind};
use classswift_core::result::AppResult;
use classswift_entity::student::model::Student;

/// Repository for student identity records.
#[derive(Debug, Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    /// Create a new student repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a student by name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Student>> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find student", e))
    }

    /// Find a student by name, creating the row when absent.
    ///
    /// Runs on a transaction connection so the identity resolution shares
    /// the join transaction's atomicity. The no-op update on conflict makes
    /// `RETURNING *` yield the existing row.
    pub async fn find_or_create_tx(conn: &mut PgConnection, name: &str) -> AppResult<Student> {
        sqlx::query_as::<_, Student>(
            "INSERT INTO students (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET updated_at = NOW() RETURNING *",
        )
        .bind(name)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve student", e))
    }
}
