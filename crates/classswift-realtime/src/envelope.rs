//! Wire envelope delivered to every live viewer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The message envelope pushed to viewers.
///
/// The field names and the RFC 3339 timestamp are the wire contract with
/// the frontend; they must round-trip through serialization unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Event kind, e.g. `class_updated`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The class this event belongs to.
    #[serde(rename = "classId")]
    pub class_id: String,
    /// Event-specific payload.
    pub data: serde_json::Value,
    /// When the event was published.
    pub timestamp: DateTime<Utc>,
}

impl Envelope {
    /// Create an envelope stamped with the current time.
    pub fn new(
        kind: impl Into<String>,
        class_id: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            kind: kind.into(),
            class_id: class_id.into(),
            data,
            timestamp: Utc::now(),
        }
    }
}
