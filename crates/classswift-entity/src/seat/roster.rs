//! Roster summary view for a class.

use serde::{Deserialize, Serialize};

use super::model::SeatedStudent;

/// Snapshot of a class roster, served over HTTP and pushed to viewers
/// as the payload of `class_updated` broadcasts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    /// Students enrolled in the class with their seats.
    pub students: Vec<SeatedStudent>,
    /// Total number of seats in the class.
    pub total_capacity: i32,
    /// Number of enrolled students.
    pub enrolled_count: i32,
    /// Seats still available.
    pub available_slots: i32,
}

impl RosterSummary {
    /// Build a summary from a student list and the class capacity.
    pub fn new(students: Vec<SeatedStudent>, total_capacity: i32) -> Self {
        let enrolled_count = students.len() as i32;
        Self {
            students,
            total_capacity,
            enrolled_count,
            available_slots: total_capacity - enrolled_count,
        }
    }
}
