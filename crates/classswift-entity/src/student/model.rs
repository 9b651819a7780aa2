//! Student entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student identity, independent of any class.
///
/// Identity is keyed by name: joining under a known name reuses the row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique student identifier.
    pub id: i64,
    /// Student name (unique).
    pub name: String,
    /// When the student was first seen.
    pub created_at: DateTime<Utc>,
    /// When the student was last updated.
    pub updated_at: DateTime<Utc>,
}
