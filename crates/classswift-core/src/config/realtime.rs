//! Real-time broadcast hub configuration.

use serde::{Deserialize, Serialize};

/// Session broadcast hub configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Capacity of the bounded broadcast queue; publishes are dropped when
    /// the queue is full.
    #[serde(default = "default_broadcast_queue")]
    pub broadcast_queue_size: usize,
    /// Per-connection outbound frame buffer size.
    #[serde(default = "default_connection_buffer")]
    pub connection_buffer_size: usize,
    /// WebSocket ping interval in seconds.
    #[serde(default = "default_ping_interval")]
    pub ping_interval_seconds: u64,
    /// Read deadline in seconds; any inbound frame re-arms it.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_seconds: u64,
    /// Per-connection delivery timeout in milliseconds; a write that does
    /// not complete in time gets the connection evicted.
    #[serde(default = "default_write_timeout")]
    pub write_timeout_ms: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            broadcast_queue_size: default_broadcast_queue(),
            connection_buffer_size: default_connection_buffer(),
            ping_interval_seconds: default_ping_interval(),
            read_timeout_seconds: default_read_timeout(),
            write_timeout_ms: default_write_timeout(),
        }
    }
}

fn default_broadcast_queue() -> usize {
    256
}

fn default_connection_buffer() -> usize {
    64
}

fn default_ping_interval() -> u64 {
    30
}

fn default_read_timeout() -> u64 {
    60
}

fn default_write_timeout() -> u64 {
    1000
}
