//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`OrderEvent`]s. It is
//! designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use mixdesk_core::types::DbId;

// ---------------------------------------------------------------------------
// OrderEvent
// ---------------------------------------------------------------------------

/// A domain event describing a change to the orders collection.
///
/// Constructed via [`OrderEvent::new`] and enriched with the builder
/// methods [`with_actor`](OrderEvent::with_actor) and
/// [`with_payload`](OrderEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Dot-separated event name, e.g. `"order.status_changed"`.
    pub event_type: String,

    /// The order this event concerns.
    pub order_id: DbId,

    /// Optional id of the user that triggered the event. `None` for
    /// system-initiated changes.
    pub actor_user_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl OrderEvent {
    /// Create a new event with the required type and order id.
    pub fn new(event_type: impl Into<String>, order_id: DbId) -> Self {
        Self {
            event_type: event_type.into(),
            order_id,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the acting user to the event.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// For status-change events: the previous status, if carried.
    pub fn previous_status(&self) -> Option<&str> {
        self.payload.get("previous_status").and_then(|v| v.as_str())
    }

    /// For status-change events: the new status, if carried.
    pub fn new_status(&self) -> Option<&str> {
        self.payload.get("new_status").and_then(|v| v.as_str())
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`OrderEvent`].
pub struct EventBus {
    sender: broadcast::Sender<OrderEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: OrderEvent) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EVENT_ORDER_STATUS_CHANGED;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = OrderEvent::new(EVENT_ORDER_STATUS_CHANGED, 42)
            .with_actor(7)
            .with_payload(serde_json::json!({
                "previous_status": "new",
                "new_status": "in_progress",
            }));

        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, EVENT_ORDER_STATUS_CHANGED);
        assert_eq!(received.order_id, 42);
        assert_eq!(received.actor_user_id, Some(7));
        assert_eq!(received.previous_status(), Some("new"));
        assert_eq!(received.new_status(), Some("in_progress"));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(OrderEvent::new("order.created", 1));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.order_id, 1);
        assert_eq!(e2.order_id, 1);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        // No subscribers -- this must not panic.
        bus.publish(OrderEvent::new("order.created", 9));
    }

    #[test]
    fn status_accessors_absent_on_bare_event() {
        let event = OrderEvent::new("order.created", 3);
        assert!(event.previous_status().is_none());
        assert!(event.new_status().is_none());
    }
}
