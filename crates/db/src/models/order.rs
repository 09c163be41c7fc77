//! Order entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mixdesk_core::files::FileDescriptor;
use mixdesk_core::types::{DbId, Timestamp};

/// A row from the `orders` table.
///
/// `files` is the raw JSONB column; use [`Order::file_descriptors`] for the
/// typed view.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: DbId,
    pub client_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub service_kind: String,
    pub music_style: String,
    pub status: String,
    pub price: i32,
    pub files: serde_json::Value,
    pub deadline: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Decode the `files` JSONB column into typed descriptors.
    ///
    /// Rows written by this system always decode cleanly; a malformed
    /// column yields an empty list rather than a panic.
    pub fn file_descriptors(&self) -> Vec<FileDescriptor> {
        serde_json::from_value(self.files.clone()).unwrap_or_default()
    }
}

/// DTO for creating an order row.
#[derive(Debug)]
pub struct CreateOrder {
    pub client_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub service_kind: String,
    pub music_style: String,
    pub status: String,
    pub price: i32,
    pub files: serde_json::Value,
    pub deadline: Option<Timestamp>,
}
