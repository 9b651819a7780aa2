//! Class entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A classroom that students join and viewers observe.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    /// Internal class identifier.
    pub id: String,
    /// Public identifier used in join links and WebSocket paths.
    pub public_id: String,
    /// Display name.
    pub name: String,
    /// Total number of seats.
    pub total_capacity: i32,
    /// Whether the class currently accepts joins.
    pub is_active: bool,
    /// When the class was created.
    pub created_at: DateTime<Utc>,
    /// When the class was last updated.
    pub updated_at: DateTime<Utc>,
}
