//! The cached order store.
//!
//! Holds a non-authoritative snapshot of the orders visible to the current
//! session. Every operation re-derives state from the server rather than
//! computing diffs: the full reload is the reconciliation primitive, and
//! the remote store always wins over local optimistic state.

use std::sync::Arc;

use tokio::sync::RwLock;

use mixdesk_core::status::OrderStatus;
use mixdesk_core::types::DbId;
use mixdesk_core::uploads::UploadPolicy;

use crate::error::ClientError;
use crate::gateway::OrdersApi;
use crate::notices::NoticeSink;
use crate::types::{LocalFile, NewOrder, Order, StatusHistoryEntry};

/// Client-side cache of order records with the status-mutation entry point.
pub struct OrderStore {
    api: Arc<dyn OrdersApi>,
    notices: Arc<dyn NoticeSink>,
    policy: UploadPolicy,
    orders: RwLock<Vec<Order>>,
}

impl OrderStore {
    pub fn new(api: Arc<dyn OrdersApi>, notices: Arc<dyn NoticeSink>) -> Self {
        Self::with_policy(api, notices, UploadPolicy::default())
    }

    pub fn with_policy(
        api: Arc<dyn OrdersApi>,
        notices: Arc<dyn NoticeSink>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            api,
            notices,
            policy,
            orders: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of the cached orders, newest first.
    pub async fn orders(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    /// Replace the entire cache with the server's view.
    ///
    /// The server applies the role filter (admin sees everything, a client
    /// only their own orders). On failure the cache is left untouched and
    /// the error is surfaced so the caller can retry by re-invoking.
    pub async fn load_orders(&self) -> Result<(), ClientError> {
        match self.api.list_orders().await {
            Ok(mut fetched) => {
                fetched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                *self.orders.write().await = fetched;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load orders");
                self.notices.error("Failed to load orders");
                Err(e)
            }
        }
    }

    /// Create an order and reconcile the cache.
    pub async fn create_order(&self, order: NewOrder) -> Result<Order, ClientError> {
        match self.api.create_order(order).await {
            Ok(created) => {
                self.notices.success("Order created successfully");
                let _ = self.load_orders().await;
                Ok(created)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create order");
                self.notices.error("Failed to create order");
                Err(e)
            }
        }
    }

    /// The single mutation entry point for order status.
    ///
    /// Performs no transition-legality or authorization check of its own --
    /// gating belongs to [`StatusControls`](crate::guard::StatusControls)
    /// and, authoritatively, to the server. On success the cache entry is
    /// patched optimistically for immediate feedback, then overwritten by
    /// a full reload of the server's view. On failure the cache is not
    /// touched and the error propagates so the caller can keep the control
    /// actionable.
    pub async fn update_order_status(
        &self,
        order_id: DbId,
        status: OrderStatus,
        notes: Option<String>,
    ) -> Result<(), ClientError> {
        match self.api.update_status(order_id, status, notes).await {
            Ok(_updated) => {
                // Optimistic patch, advisory only.
                {
                    let mut orders = self.orders.write().await;
                    if let Some(order) = orders.iter_mut().find(|o| o.id == order_id) {
                        order.status = status;
                        order.updated_at = chrono::Utc::now();
                    }
                }

                self.notices
                    .success(format!("Order status updated to {}", status.display()));

                // Reconcile against the source of truth. The reload result
                // is authoritative; if it fails we keep the optimistic
                // state and the next successful reload corrects it.
                if self.load_orders().await.is_err() {
                    tracing::warn!(order_id, "Reconciling reload after status update failed");
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(order_id, error = %e, "Failed to update order status");
                self.notices.error("Failed to update order status");
                Err(e)
            }
        }
    }

    /// Status audit trail for one order, newest first.
    ///
    /// Soft-fail read path: a remote error is logged and surfaced as a
    /// warning notice, and the caller receives an empty list -- the history
    /// panel is not worth blocking a view over.
    pub async fn get_status_history(&self, order_id: DbId) -> Vec<StatusHistoryEntry> {
        match self.api.status_history(order_id).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(order_id, error = %e, "Failed to load status history");
                self.notices.warning("Failed to load status history");
                Vec::new()
            }
        }
    }

    /// Upload a batch of files to an order.
    ///
    /// Every file is validated against the upload policy before any
    /// network call; one invalid file rejects the whole batch locally.
    /// Server-side, a mid-batch storage failure rolls back the files
    /// already stored, so a failed batch never leaves orphans.
    pub async fn upload_files(
        &self,
        order_id: DbId,
        files: Vec<LocalFile>,
    ) -> Result<(), ClientError> {
        if files.is_empty() {
            return Err(ClientError::Upload("No files selected".into()));
        }

        for file in &files {
            if let Err(rejection) =
                self.policy
                    .validate(&file.name, &file.content_type, file.bytes.len() as u64)
            {
                self.notices.error(rejection.to_string());
                return Err(ClientError::Upload(rejection.to_string()));
            }
        }

        match self.api.upload_files(order_id, files).await {
            Ok(_order) => {
                self.notices.success("Files uploaded successfully");
                let _ = self.load_orders().await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(order_id, error = %e, "Failed to upload files");
                self.notices.error("Failed to upload files");
                Err(e)
            }
        }
    }
}
