//! Revision entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mixdesk_core::files::FileDescriptor;
use mixdesk_core::types::{DbId, Timestamp};

/// A row from the `revisions` table: one delivered file per version.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Revision {
    pub id: DbId,
    pub order_id: DbId,
    pub version: i32,
    pub file: serde_json::Value,
    pub notes: Option<String>,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
}

impl Revision {
    /// Decode the `file` JSONB column into a typed descriptor.
    pub fn file_descriptor(&self) -> Option<FileDescriptor> {
        serde_json::from_value(self.file.clone()).ok()
    }
}

/// DTO for creating a revision row. The version is assigned by the
/// repository, not the caller.
#[derive(Debug)]
pub struct CreateRevision {
    pub order_id: DbId,
    pub file: serde_json::Value,
    pub notes: Option<String>,
    pub uploaded_by: Option<DbId>,
}
