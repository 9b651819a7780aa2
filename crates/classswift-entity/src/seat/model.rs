//! Seat assignment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The relationship between a student and a class, with an optional seat.
///
/// At most one row exists per (class, student). A `NULL` seat number means
/// the student is enrolled but unseated; the row is kept so identity and
/// enrollment history survive a bulk seat clear.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignment {
    /// Unique assignment identifier.
    pub id: i64,
    /// The student holding this assignment.
    pub student_id: i64,
    /// The class this assignment belongs to.
    pub class_id: String,
    /// Occupied seat number, or `None` when unseated.
    pub seat_number: Option<i32>,
    /// When the student first joined the class.
    pub assigned_at: DateTime<Utc>,
    /// When the assignment was last changed.
    pub updated_at: DateTime<Utc>,
}

/// A student joined with their assignment details for one class.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SeatedStudent {
    /// Student identifier.
    pub id: i64,
    /// Student name.
    pub name: String,
    /// The class the assignment belongs to.
    pub class_id: String,
    /// Occupied seat number, or `None` when unseated.
    pub seat_number: Option<i32>,
    /// When the student first joined the class.
    pub assigned_at: DateTime<Utc>,
    /// When the assignment was last changed.
    pub updated_at: DateTime<Utc>,
}
