//! Event-to-WebSocket feed router.
//!
//! [`FeedRouter`] subscribes to the order event bus and pushes every event
//! to connected WebSocket clients as a JSON text frame. Clients treat the
//! frames as a change feed and resynchronize by re-fetching; the server
//! never sends incremental patches.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use mixdesk_events::OrderEvent;

use crate::ws::WsManager;

/// Routes order events to WebSocket connections.
pub struct FeedRouter {
    ws_manager: Arc<WsManager>,
}

impl FeedRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Consumes events from the broadcast channel until it closes (i.e. the
    /// [`EventBus`](mixdesk_events::EventBus) is dropped during shutdown).
    pub async fn run(self, mut receiver: broadcast::Receiver<OrderEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    self.push_event(&event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Feed router lagged behind event bus");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, feed router shutting down");
                    break;
                }
            }
        }
    }

    /// Serialize one event and broadcast it to every connection.
    async fn push_event(&self, event: &OrderEvent) {
        let frame = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, event_type = %event.event_type, "Failed to serialize event");
                return;
            }
        };

        tracing::debug!(
            event_type = %event.event_type,
            order_id = event.order_id,
            "Pushing event to WebSocket clients"
        );
        self.ws_manager.broadcast(Message::Text(frame.into())).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixdesk_events::{EventBus, EVENT_ORDER_STATUS_CHANGED};

    #[tokio::test]
    async fn status_change_event_reaches_ws_connection() {
        let ws_manager = Arc::new(WsManager::new());
        let mut rx = ws_manager.add("conn".into(), None).await;

        let bus = EventBus::default();
        let router = FeedRouter::new(Arc::clone(&ws_manager));
        let handle = tokio::spawn(router.run(bus.subscribe()));

        bus.publish(
            OrderEvent::new(EVENT_ORDER_STATUS_CHANGED, 5).with_payload(serde_json::json!({
                "previous_status": "new",
                "new_status": "review",
            })),
        );

        let msg = rx.recv().await.expect("frame should arrive");
        let Message::Text(text) = msg else {
            panic!("expected a text frame");
        };
        let event: OrderEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(event.order_id, 5);
        assert_eq!(event.new_status(), Some("review"));

        drop(bus);
        handle.await.unwrap();
    }
}
