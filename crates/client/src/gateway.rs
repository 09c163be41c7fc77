//! Backend access traits.
//!
//! The store, session, and notifier never talk to the network directly;
//! they call these traits. [`HttpGateway`](crate::http::HttpGateway) and
//! [`WsChangeFeed`](crate::ws_feed::WsChangeFeed) are the production
//! implementations; tests substitute in-memory fakes.

use async_trait::async_trait;
use tokio::sync::mpsc;

use mixdesk_core::status::OrderStatus;
use mixdesk_core::types::DbId;

use crate::error::ClientError;
use crate::types::{FeedEvent, LocalFile, NewOrder, Order, Profile, StatusHistoryEntry};

/// Order collection operations. The server applies the role filter on
/// listing -- an admin token sees every order, a client token its own.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<Order>, ClientError>;

    async fn create_order(&self, order: NewOrder) -> Result<Order, ClientError>;

    async fn update_status(
        &self,
        order_id: DbId,
        status: OrderStatus,
        notes: Option<String>,
    ) -> Result<Order, ClientError>;

    async fn status_history(&self, order_id: DbId)
        -> Result<Vec<StatusHistoryEntry>, ClientError>;

    /// Upload a batch of files to an order in one request. The server
    /// validates, stores, and rolls back the whole batch on failure.
    async fn upload_files(
        &self,
        order_id: DbId,
        files: Vec<LocalFile>,
    ) -> Result<Order, ClientError>;
}

/// Identity operations.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Profile, ClientError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Profile, ClientError>;

    async fn sign_out(&self) -> Result<(), ClientError>;

    /// The profile for the current session, or `None` when signed out.
    async fn current_profile(&self) -> Result<Option<Profile>, ClientError>;
}

/// The order change feed.
///
/// `connect` opens a push channel and returns its receiving half; the
/// connection lives until the receiver is dropped.
#[async_trait]
pub trait ChangeFeed: Send + Sync {
    async fn connect(&self) -> Result<mpsc::Receiver<FeedEvent>, ClientError>;
}
