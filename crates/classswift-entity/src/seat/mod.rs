//! Seat assignment entity and roster views.

pub mod model;
pub mod roster;

pub use model::{SeatAssignment, SeatedStudent};
pub use roster::RosterSummary;
