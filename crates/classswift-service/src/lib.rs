//! # classswift-service
//!
//! Business logic services for the ClassSwift backend: class and roster
//! queries, and the transactional seat-assignment operation.

pub mod class;
pub mod join;

pub use class::service::ClassService;
pub use join::service::{JoinOutcome, JoinService};
