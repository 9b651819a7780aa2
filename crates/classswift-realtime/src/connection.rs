//! Individual viewer connection handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// A frame queued for delivery to a viewer.
///
/// The hub and heartbeat produce these; the transport-side writer task
/// turns them into actual WebSocket frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// A serialized event envelope.
    Text(String),
    /// Server keepalive ping.
    Ping,
    /// Orderly close; the writer sends a close frame and stops.
    Close,
}

/// A handle to a single live viewer connection, scoped to one class.
///
/// Holds the buffered sender for pushing frames to the client. The
/// receiving half is owned by the writer task created at upgrade time.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// The class this viewer observes; immutable after creation.
    pub class_id: String,
    /// Sender for outbound frames.
    sender: mpsc::Sender<OutboundFrame>,
    /// Whether the connection is still considered live.
    alive: AtomicBool,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
}

impl ConnectionHandle {
    /// Create a new connection handle around an outbound frame sender.
    pub fn new(class_id: impl Into<String>, sender: mpsc::Sender<OutboundFrame>) -> Self {
        Self {
            id: Uuid::new_v4(),
            class_id: class_id.into(),
            sender,
            alive: AtomicBool::new(true),
            connected_at: Utc::now(),
        }
    }

    /// Create a handle together with the receiver for its writer task.
    pub fn channel(
        class_id: impl Into<String>,
        buffer: usize,
    ) -> (Arc<Self>, mpsc::Receiver<OutboundFrame>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Arc::new(Self::new(class_id, tx)), rx)
    }

    /// Queue a frame, waiting for buffer space.
    ///
    /// Returns `false` when the connection is closed. The hub bounds this
    /// wait with its write timeout; a full buffer past the deadline marks
    /// the consumer as stalled.
    pub async fn send(&self, frame: OutboundFrame) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.sender.send(frame).await.is_ok()
    }

    /// Queue a frame without waiting; drops the frame when full.
    pub fn try_send(&self, frame: OutboundFrame) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.sender.try_send(frame).is_ok()
    }

    /// Check if the connection is still live.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst) && !self.sender.is_closed()
    }

    /// Mark the connection as closed.
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Close the connection: mark it dead and ask the writer to shut the
    /// underlying channel. Safe to call more than once.
    pub fn close(&self) {
        let was_alive = self.alive.swap(false, Ordering::SeqCst);
        if was_alive {
            let _ = self.sender.try_send(OutboundFrame::Close);
        }
    }
}
