//! Realtime notifier: keeps the order store fresh when changes happen
//! outside the current session.
//!
//! Maintains at most one active subscription to the order change feed.
//! On a status-change event whose previous and new status differ, emits
//! an informational notice and triggers a full cache reload -- no
//! incremental merging.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::ClientError;
use crate::gateway::ChangeFeed;
use crate::notices::NoticeSink;
use crate::store::OrderStore;
use crate::types::{FeedEvent, FEED_EVENT_STATUS_CHANGED};

/// Subscribes the order store to the change feed.
pub struct RealtimeNotifier {
    feed: Arc<dyn ChangeFeed>,
    store: Arc<OrderStore>,
    notices: Arc<dyn NoticeSink>,
    subscription: Mutex<Option<JoinHandle<()>>>,
}

impl RealtimeNotifier {
    pub fn new(
        feed: Arc<dyn ChangeFeed>,
        store: Arc<OrderStore>,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            feed,
            store,
            notices,
            subscription: Mutex::new(None),
        }
    }

    /// Open the feed subscription. Idempotent: calling while already
    /// subscribed is a no-op and opens no second channel.
    pub async fn subscribe(&self) -> Result<(), ClientError> {
        let mut subscription = self.subscription.lock().await;
        if subscription.is_some() {
            return Ok(());
        }

        let mut receiver = self.feed.connect().await?;
        let store = Arc::clone(&self.store);
        let notices = Arc::clone(&self.notices);

        let handle = tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                handle_event(&store, &notices, &event).await;
            }
            tracing::debug!("Order change feed closed");
        });

        *subscription = Some(handle);
        tracing::info!("Subscribed to order change feed");
        Ok(())
    }

    /// Tear down the subscription. Safe to call when not subscribed.
    pub async fn unsubscribe(&self) {
        if let Some(handle) = self.subscription.lock().await.take() {
            handle.abort();
            tracing::info!("Unsubscribed from order change feed");
        }
    }

    /// Whether a subscription is currently active.
    pub async fn is_subscribed(&self) -> bool {
        self.subscription.lock().await.is_some()
    }
}

/// Process one feed event: notify on visible status changes, then
/// resynchronize the whole cache. Full reload is the reconciliation
/// strategy; the remote store is authoritative.
async fn handle_event(store: &OrderStore, notices: &Arc<dyn NoticeSink>, event: &FeedEvent) {
    if event.event_type == FEED_EVENT_STATUS_CHANGED {
        let previous = event.previous_status();
        let new = event.new_status();
        if let Some(new_status) = new {
            if previous != Some(new_status) {
                notices.info(format!(
                    "Order status updated to: {}",
                    new_status.display()
                ));
            }
        }
    }

    if store.load_orders().await.is_err() {
        tracing::warn!(
            event_type = %event.event_type,
            order_id = event.order_id,
            "Reload after feed event failed"
        );
    }
}
