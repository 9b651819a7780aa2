//! # classswift-realtime
//!
//! Session broadcast hub for ClassSwift. Provides:
//!
//! - Per-class viewer connection registry owned by a single hub task
//! - Ordered event fan-out with per-connection write deadlines
//! - Self-healing eviction of stalled or broken connections
//! - Connection heartbeat (server ping) support
//! - The wire envelope delivered to every viewer

pub mod connection;
pub mod envelope;
pub mod heartbeat;
pub mod hub;
pub mod registry;

pub use connection::{ConnectionHandle, ConnectionId, OutboundFrame};
pub use envelope::Envelope;
pub use hub::{HubHandle, HubSnapshot, SessionHub};
pub use registry::ClassRegistry;
