//! Seat assignment repository implementation.

use sqlx::{PgConnection, PgPool};

use classswift_core::error::{AppError, ErrorKind};
use classswift_core::result::AppResult;
use classswift_entity::seat::model::{SeatAssignment, SeatedStudent};

/// Repository for seat assignment rows.
///
/// The single-row mutations run on a transaction connection: the join
/// transaction in the service layer owns the `BEGIN`/`COMMIT` and threads
/// its connection through these methods.
#[derive(Debug, Clone)]
pub struct SeatAssignmentRepository {
    pool: PgPool,
}

impl SeatAssignmentRepository {
    /// Create a new seat assignment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a class roster: every enrolled student with their seat.
    pub async fn roster_for_class(&self, class_id: &str) -> AppResult<Vec<SeatedStudent>> {
        sqlx::query_as::<_, SeatedStudent>(
            "SELECT s.id, s.name, a.class_id, a.seat_number, a.assigned_at, a.updated_at \
             FROM seat_assignments a \
             INNER JOIN students s ON s.id = a.student_id \
             WHERE a.class_id = $1 \
             ORDER BY a.assigned_at, s.id",
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load roster", e))
    }

    /// Find the assignment currently holding a seat, locking the row.
    ///
    /// `FOR UPDATE` serializes concurrent claims on an occupied seat; the
    /// partial unique index on `(class_id, seat_number)` covers the
    /// free-seat insert race.
    pub async fn find_by_seat_for_update(
        conn: &mut PgConnection,
        class_id: &str,
        seat_number: i32,
    ) -> AppResult<Option<SeatAssignment>> {
        sqlx::query_as::<_, SeatAssignment>(
            "SELECT * FROM seat_assignments \
             WHERE class_id = $1 AND seat_number = $2 FOR UPDATE",
        )
        .bind(class_id)
        .bind(seat_number)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check seat", e))
    }

    /// Find a student's assignment row for a class.
    pub async fn find_by_student_and_class(
        conn: &mut PgConnection,
        student_id: i64,
        class_id: &str,
    ) -> AppResult<Option<SeatAssignment>> {
        sqlx::query_as::<_, SeatAssignment>(
            "SELECT * FROM seat_assignments WHERE student_id = $1 AND class_id = $2",
        )
        .bind(student_id)
        .bind(class_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find assignment", e))
    }

    /// Move an existing assignment to a new seat.
    pub async fn set_seat(
        conn: &mut PgConnection,
        assignment_id: i64,
        seat_number: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE seat_assignments SET seat_number = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(assignment_id)
        .bind(seat_number)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Create a new assignment row with the given seat.
    pub async fn insert(
        conn: &mut PgConnection,
        student_id: i64,
        class_id: &str,
        seat_number: i32,
    ) -> Result<SeatAssignment, sqlx::Error> {
        sqlx::query_as::<_, SeatAssignment>(
            "INSERT INTO seat_assignments (student_id, class_id, seat_number) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(student_id)
        .bind(class_id)
        .bind(seat_number)
        .fetch_one(conn)
        .await
    }

    /// Unseat every student in a class, keeping the assignment rows.
    pub async fn clear_seats_for_class(
        conn: &mut PgConnection,
        class_id: &str,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE seat_assignments SET seat_number = NULL, updated_at = NOW() \
             WHERE class_id = $1 AND seat_number IS NOT NULL",
        )
        .bind(class_id)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear seats", e))?;
        Ok(result.rows_affected())
    }
}
