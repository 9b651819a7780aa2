//! Server-initiated keepalive pings for viewer connections.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::debug;

use crate::connection::{ConnectionHandle, OutboundFrame};

/// Run the heartbeat loop for a connection.
///
/// Queues a ping frame at every interval until the connection dies. The
/// matching liveness check is the read deadline in the transport layer:
/// any inbound frame, pong included, re-arms it.
pub async fn run_heartbeat(handle: Arc<ConnectionHandle>, interval: Duration) {
    let mut ticker = time::interval(interval);
    // The first tick fires immediately; skip it so pings start one full
    // interval after connect.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        if !handle.is_alive() {
            break;
        }

        if !handle.send(OutboundFrame::Ping).await {
            debug!(conn_id = %handle.id, "Ping send failed, ending heartbeat");
            break;
        }
    }

    debug!(conn_id = %handle.id, "Heartbeat loop ended");
}
