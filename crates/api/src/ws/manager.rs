use std::collections::HashMap;

use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};

use mixdesk_core::types::{DbId, Timestamp};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Authenticated user ID, if the connection presented a valid token at
    /// upgrade time.
    pub user_id: Option<DbId>,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active WebSocket connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        user_id: Option<DbId>,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Broadcast a message to all connected clients.
    ///
    /// Connections whose send channels are closed are silently skipped
    /// (they will be cleaned up on their next receive loop iteration).
    pub async fn broadcast(&self, message: Message) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(message.clone());
        }
    }

    /// Send a message to all connections belonging to a specific user.
    ///
    /// Returns the number of connections the message was sent to.
    pub async fn send_to_user(&self, user_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            if conn.user_id == Some(user_id) {
                let _ = conn.sender.send(message.clone());
                count += 1;
            }
        }
        count
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Vec::new().into()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_and_remove_tracks_count() {
        let manager = WsManager::new();
        let _rx = manager.add("conn-1".into(), None).await;
        assert_eq!(manager.connection_count().await, 1);

        manager.remove("conn-1").await;
        assert_eq!(manager.connection_count().await, 0);
    }

    #[tokio::test]
    async fn broadcast_reaches_every_connection() {
        let manager = WsManager::new();
        let mut rx1 = manager.add("a".into(), Some(1)).await;
        let mut rx2 = manager.add("b".into(), Some(2)).await;

        manager.broadcast(Message::Text("hello".into())).await;

        assert!(matches!(rx1.recv().await, Some(Message::Text(_))));
        assert!(matches!(rx2.recv().await, Some(Message::Text(_))));
    }

    #[tokio::test]
    async fn send_to_user_targets_only_their_connections() {
        let manager = WsManager::new();
        let mut rx1 = manager.add("a".into(), Some(1)).await;
        let mut rx2 = manager.add("b".into(), Some(2)).await;

        let sent = manager.send_to_user(1, Message::Text("direct".into())).await;
        assert_eq!(sent, 1);

        assert!(matches!(rx1.recv().await, Some(Message::Text(_))));
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn shutdown_all_closes_and_clears() {
        let manager = WsManager::new();
        let mut rx = manager.add("a".into(), None).await;

        manager.shutdown_all().await;
        assert_eq!(manager.connection_count().await, 0);
        assert!(matches!(rx.recv().await, Some(Message::Close(_))));
    }
}
