//! The seat-assignment transaction.
//!
//! Seat exclusivity is enforced by the store, not by an in-process lock:
//! multiple server processes may run against the same database, so the
//! row lock taken here plus the partial unique index on
//! `(class_id, seat_number)` are the actual serialization points.

use sqlx::PgPool;
use tracing::info;

use classswift_core::error::{AppError, ErrorKind};
use classswift_core::result::AppResult;
use classswift_database::repositories::class::ClassRepository;
use classswift_database::repositories::seat::SeatAssignmentRepository;
use classswift_database::repositories::student::StudentRepository;
use classswift_entity::class::model::Class;

/// Outcome of a seat-assignment attempt.
///
/// Storage failures surface separately as `Err(AppError)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The student now holds the requested seat.
    Assigned,
    /// The seat is held by a different student.
    SeatTaken,
}

/// Transactional seat-assignment service.
#[derive(Debug, Clone)]
pub struct JoinService {
    pool: PgPool,
}

impl JoinService {
    /// Creates a new join service.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically seat a student in a class.
    ///
    /// One all-or-nothing transaction: resolve the student identity, check
    /// the seat under a row lock, then update the student's assignment row
    /// or create one. Re-requesting a seat you already hold succeeds
    /// without touching anything.
    pub async fn assign_seat(
        &self,
        class: &Class,
        student_name: &str,
        seat_number: i32,
    ) -> AppResult<JoinOutcome> {
        if seat_number <= 0 {
            return Err(AppError::validation("Seat number must be a positive integer"));
        }
        let student_name = student_name.trim();
        if student_name.is_empty() {
            return Err(AppError::validation("Student name must not be empty"));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin join", e))?;

        let student = StudentRepository::find_or_create_tx(&mut tx, student_name).await?;

        if let Some(occupant) =
            SeatAssignmentRepository::find_by_seat_for_update(&mut tx, &class.id, seat_number)
                .await?
        {
            if occupant.student_id == student.id {
                // Already seated there; idempotent success.
                tx.commit().await.map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to commit join", e)
                })?;
                return Ok(JoinOutcome::Assigned);
            }
            let _ = tx.rollback().await;
            return Ok(JoinOutcome::SeatTaken);
        }

        let existing =
            SeatAssignmentRepository::find_by_student_and_class(&mut tx, student.id, &class.id)
                .await?;

        let write = match existing {
            Some(assignment) => {
                SeatAssignmentRepository::set_seat(&mut tx, assignment.id, seat_number).await
            }
            None => {
                SeatAssignmentRepository::insert(&mut tx, student.id, &class.id, seat_number)
                    .await
                    .map(|_| ())
            }
        };

        if let Err(e) = write {
            let _ = tx.rollback().await;
            // A racing transaction can win the seat between our lock check
            // and the write; the unique index reports it as a conflict.
            if is_unique_violation(&e) {
                return Ok(JoinOutcome::SeatTaken);
            }
            return Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to write seat assignment",
                e,
            ));
        }

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit join", e))?;

        info!(
            class_id = %class.id,
            student = %student_name,
            seat = seat_number,
            "Student seated"
        );
        Ok(JoinOutcome::Assigned)
    }

    /// Unseat every student in a class as one batch.
    ///
    /// Assignment rows and student identities are preserved; only the seat
    /// numbers are cleared.
    pub async fn clear_seats(&self, public_id: &str) -> AppResult<Class> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin seat clear", e)
        })?;

        let class = ClassRepository::find_by_public_id_tx(&mut tx, public_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Class {public_id} not found")))?;

        let cleared = SeatAssignmentRepository::clear_seats_for_class(&mut tx, &class.id).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit seat clear", e)
        })?;

        info!(class_id = %class.id, cleared, "Cleared class seats");
        Ok(class)
    }
}

/// Whether a sqlx error is a unique-constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
