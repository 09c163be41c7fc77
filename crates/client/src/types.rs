//! Wire types for the client SDK.
//!
//! These mirror the server's JSON shapes but use the typed domain enums
//! from `mixdesk_core` -- an order whose status or service kind fails to
//! parse is rejected at the serde boundary instead of leaking through.

use serde::{Deserialize, Serialize};

use mixdesk_core::files::FileDescriptor;
use mixdesk_core::services::ServiceKind;
use mixdesk_core::status::OrderStatus;
use mixdesk_core::types::{DbId, Timestamp};

/// An order as seen by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: DbId,
    pub client_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub service_kind: ServiceKind,
    pub music_style: String,
    pub status: OrderStatus,
    pub price: i32,
    pub files: Vec<FileDescriptor>,
    pub deadline: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A status audit entry, enriched with the actor's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub id: DbId,
    pub order_id: DbId,
    pub previous_status: Option<OrderStatus>,
    pub new_status: OrderStatus,
    pub changed_by: Option<DbId>,
    pub changed_by_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
}

/// Fields a client submits to create an order. The server assigns the
/// price and initial status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub title: String,
    pub description: Option<String>,
    pub service_kind: ServiceKind,
    pub music_style: String,
    pub deadline: Option<Timestamp>,
}

/// A file selected for upload, held in memory until the batch is sent.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Feed frame type emitted when an order's status changes.
pub const FEED_EVENT_STATUS_CHANGED: &str = "order.status_changed";

/// One frame from the order change feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEvent {
    pub event_type: String,
    pub order_id: DbId,
    pub actor_user_id: Option<DbId>,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub timestamp: Timestamp,
}

impl FeedEvent {
    /// For status-change frames: the previous status, if present and valid.
    pub fn previous_status(&self) -> Option<OrderStatus> {
        self.payload
            .get("previous_status")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
    }

    /// For status-change frames: the new status, if present and valid.
    pub fn new_status(&self) -> Option<OrderStatus> {
        self.payload
            .get("new_status")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
    }
}
