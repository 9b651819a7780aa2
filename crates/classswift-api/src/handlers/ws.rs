//! WebSocket upgrade handler and connection driving.

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use classswift_realtime::connection::{ConnectionHandle, OutboundFrame};
use classswift_realtime::heartbeat::run_heartbeat;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/classes/{class_id}/ws — WebSocket upgrade.
///
/// The class must resolve before the hub gets involved; unknown ids are
/// rejected at the HTTP layer.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let class = state.class_service.get_class(&class_id).await?;

    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, class.public_id, socket)))
}

/// Drives an established WebSocket connection until it closes.
async fn handle_ws_connection(state: AppState, class_id: String, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let realtime = &state.config.realtime;

    let (handle, mut outbound_rx) =
        ConnectionHandle::channel(class_id.clone(), realtime.connection_buffer_size);

    state.hub.register(handle.clone());

    info!(
        conn_id = %handle.id,
        class_id = %class_id,
        "WebSocket connection established"
    );

    // Forward queued frames onto the socket.
    let writer_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            let outcome = match frame {
                OutboundFrame::Text(text) => ws_tx.send(Message::Text(text.into())).await,
                OutboundFrame::Ping => ws_tx.send(Message::Ping(Bytes::new())).await,
                OutboundFrame::Close => {
                    let _ = ws_tx.send(Message::Close(None)).await;
                    break;
                }
            };
            if outcome.is_err() {
                break;
            }
        }
    });

    let heartbeat_task = tokio::spawn(run_heartbeat(
        handle.clone(),
        Duration::from_secs(realtime.ping_interval_seconds),
    ));

    // Read loop: every inbound frame re-arms the deadline. Data frames are
    // observed but not acted on; there is no inbound command protocol.
    let read_deadline = Duration::from_secs(realtime.read_timeout_seconds);
    loop {
        let frame = match tokio::time::timeout(read_deadline, ws_rx.next()).await {
            Ok(Some(Ok(frame))) => frame,
            Ok(Some(Err(e))) => {
                warn!(conn_id = %handle.id, error = %e, "WebSocket read error");
                break;
            }
            Ok(None) => break,
            Err(_) => {
                warn!(
                    conn_id = %handle.id,
                    class_id = %class_id,
                    "Read deadline expired, closing stale connection"
                );
                break;
            }
        };

        match frame {
            Message::Text(text) => {
                debug!(
                    conn_id = %handle.id,
                    class_id = %class_id,
                    message = %text,
                    "Received client message"
                );
            }
            Message::Close(_) => break,
            // Pings are answered by axum; pongs and binary frames only
            // count as liveness.
            Message::Ping(_) | Message::Pong(_) | Message::Binary(_) => {}
        }
    }

    // Cleanup: exactly one unregister per connection lifetime; the hub
    // tolerates a second one from its own eviction path.
    handle.mark_closed();
    state.hub.unregister(handle.clone());
    heartbeat_task.abort();
    writer_task.abort();

    info!(
        conn_id = %handle.id,
        class_id = %class_id,
        "WebSocket connection closed"
    );
}
