//! # classswift-entity
//!
//! Domain entity models for the ClassSwift backend: classes, students,
//! seat assignments, and the roster views built from them.

pub mod class;
pub mod seat;
pub mod student;

pub use class::model::Class;
pub use seat::model::{SeatAssignment, SeatedStudent};
pub use seat::roster::RosterSummary;
pub use student::model::Student;
