use std::sync::Arc;

use mixdesk_core::uploads::UploadPolicy;
use mixdesk_storage::ObjectStore;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mixdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for publishing order events.
    pub event_bus: Arc<mixdesk_events::EventBus>,
    /// Object store for order files.
    pub object_store: Arc<dyn ObjectStore>,
    /// Upload validation policy derived from config.
    pub upload_policy: UploadPolicy,
}
