//! Session broadcast hub.
//!
//! The hub is the single writer of the [`ClassRegistry`]: one task consumes
//! register/unregister/broadcast events from its queues and applies them
//! strictly sequentially, so registry mutations and fan-outs for a class
//! are observed in enqueue order without any lock around the registry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use classswift_core::config::realtime::RealtimeConfig;

use crate::connection::{ConnectionHandle, OutboundFrame};
use crate::envelope::Envelope;
use crate::registry::ClassRegistry;

/// A broadcast queued for fan-out to one class's viewers.
#[derive(Debug)]
pub struct BroadcastEvent {
    /// Target class (public identifier).
    pub class_id: String,
    /// Event kind, e.g. `class_updated`.
    pub kind: String,
    /// Event payload.
    pub payload: serde_json::Value,
    /// When the event was published.
    pub timestamp: DateTime<Utc>,
}

/// Registry mutations and queries; never dropped.
enum ControlEvent {
    Register(Arc<ConnectionHandle>),
    Unregister(Arc<ConnectionHandle>),
    Snapshot(oneshot::Sender<HubSnapshot>),
}

/// Point-in-time view of the registry, for health reporting and tests.
#[derive(Debug, Clone, Default)]
pub struct HubSnapshot {
    /// Total live connections.
    pub total_connections: usize,
    /// Live connections per class.
    pub class_counts: HashMap<String, usize>,
}

/// Producer side of the hub; cheap to clone and share.
///
/// Any number of tasks may register, unregister, and publish concurrently;
/// none of these calls ever block on hub processing.
#[derive(Debug, Clone)]
pub struct HubHandle {
    control_tx: mpsc::UnboundedSender<ControlEvent>,
    broadcast_tx: mpsc::Sender<BroadcastEvent>,
}

impl HubHandle {
    /// Register a connection under its class.
    ///
    /// Uses the unbounded control queue: losing a register would orphan
    /// the connection, so it is never dropped.
    pub fn register(&self, conn: Arc<ConnectionHandle>) {
        let _ = self.control_tx.send(ControlEvent::Register(conn));
    }

    /// Unregister a connection. Idempotent: unknown connections are a
    /// no-op.
    pub fn unregister(&self, conn: Arc<ConnectionHandle>) {
        let _ = self.control_tx.send(ControlEvent::Unregister(conn));
    }

    /// Publish an event to every live viewer of a class.
    ///
    /// Best-effort: when the broadcast queue is full the event is dropped
    /// and reported rather than blocking the publisher.
    pub fn publish(
        &self,
        class_id: impl Into<String>,
        kind: impl Into<String>,
        payload: serde_json::Value,
    ) {
        let event = BroadcastEvent {
            class_id: class_id.into(),
            kind: kind.into(),
            payload,
            timestamp: Utc::now(),
        };

        match self.broadcast_tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!(
                    class_id = %event.class_id,
                    kind = %event.kind,
                    "Broadcast queue full, dropping event"
                );
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!("Session hub is not running, dropping broadcast");
            }
        }
    }

    /// Fetch a snapshot of the registry.
    pub async fn snapshot(&self) -> HubSnapshot {
        let (tx, rx) = oneshot::channel();
        if self
            .control_tx
            .send(ControlEvent::Snapshot(tx))
            .is_err()
        {
            return HubSnapshot::default();
        }
        rx.await.unwrap_or_default()
    }
}

/// The hub actor. Construct with [`SessionHub::new`], then spawn
/// [`SessionHub::run`] once from the composition root.
pub struct SessionHub {
    registry: ClassRegistry,
    control_rx: mpsc::UnboundedReceiver<ControlEvent>,
    broadcast_rx: mpsc::Receiver<BroadcastEvent>,
    /// Clone kept for self-eviction of stalled connections during fan-out.
    control_tx: mpsc::UnboundedSender<ControlEvent>,
    write_timeout: Duration,
}

impl SessionHub {
    /// Create a hub and its producer handle.
    pub fn new(config: &RealtimeConfig) -> (Self, HubHandle) {
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let (broadcast_tx, broadcast_rx) = mpsc::channel(config.broadcast_queue_size);

        let hub = Self {
            registry: ClassRegistry::new(),
            control_rx,
            broadcast_rx,
            control_tx: control_tx.clone(),
            write_timeout: Duration::from_millis(config.write_timeout_ms),
        };
        let handle = HubHandle {
            control_tx,
            broadcast_tx,
        };
        (hub, handle)
    }

    /// Run the hub loop until every [`HubHandle`] has been dropped.
    ///
    /// No single event failure ends the loop: bad connections are evicted
    /// and everything else keeps flowing.
    pub async fn run(mut self) {
        info!("Session hub started");

        loop {
            tokio::select! {
                // Drain registry mutations ahead of fan-outs so a register
                // enqueued before a broadcast is visible to it.
                biased;

                event = self.control_rx.recv() => match event {
                    Some(event) => self.handle_control(event),
                    None => break,
                },
                event = self.broadcast_rx.recv() => match event {
                    Some(event) => self.handle_broadcast(event).await,
                    None => break,
                },
            }
        }

        info!("Session hub stopped");
    }

    fn handle_control(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Register(conn) => {
                // A dead channel can never be delivered to.
                if !conn.is_alive() {
                    debug!(conn_id = %conn.id, "Skipping register of closed connection");
                    return;
                }
                info!(
                    conn_id = %conn.id,
                    class_id = %conn.class_id,
                    "Viewer connected"
                );
                self.registry.add(conn);
            }
            ControlEvent::Unregister(conn) => {
                if self.registry.remove(&conn) {
                    conn.close();
                    info!(
                        conn_id = %conn.id,
                        class_id = %conn.class_id,
                        remaining = self.registry.class_count(&conn.class_id),
                        "Viewer disconnected"
                    );
                }
            }
            ControlEvent::Snapshot(reply) => {
                let _ = reply.send(HubSnapshot {
                    total_connections: self.registry.total_connections(),
                    class_counts: self.registry.class_counts(),
                });
            }
        }
    }

    async fn handle_broadcast(&mut self, event: BroadcastEvent) {
        let connections = self.registry.class_connections(&event.class_id);
        if connections.is_empty() {
            // No live viewers for this class; not an error.
            return;
        }

        let envelope = Envelope {
            kind: event.kind,
            class_id: event.class_id,
            data: event.payload,
            timestamp: event.timestamp,
        };
        let text = match serde_json::to_string(&envelope) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Failed to serialize broadcast envelope");
                return;
            }
        };

        for conn in connections {
            let delivered = timeout(
                self.write_timeout,
                conn.send(OutboundFrame::Text(text.clone())),
            )
            .await;

            match delivered {
                Ok(true) => {}
                Ok(false) => {
                    warn!(conn_id = %conn.id, "Broadcast write failed, evicting viewer");
                    let _ = self.control_tx.send(ControlEvent::Unregister(conn));
                }
                Err(_) => {
                    warn!(
                        conn_id = %conn.id,
                        timeout_ms = self.write_timeout.as_millis() as u64,
                        "Broadcast write timed out, evicting stalled viewer"
                    );
                    let _ = self.control_tx.send(ControlEvent::Unregister(conn));
                }
            }
        }
    }
}
