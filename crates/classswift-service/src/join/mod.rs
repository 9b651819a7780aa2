//! Seat assignment: the join transaction and bulk seat clearing.

pub mod service;

pub use service::{JoinOutcome, JoinService};
