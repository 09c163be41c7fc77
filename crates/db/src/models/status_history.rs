//! Status history entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mixdesk_core::types::{DbId, Timestamp};

/// A row from the `status_history` table.
///
/// Append-only audit trail: one row per status mutation, plus a creation
/// row whose `previous_status` is NULL.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub id: DbId,
    pub order_id: DbId,
    pub previous_status: Option<String>,
    pub new_status: String,
    pub changed_by: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// A history row joined with the actor's display name.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StatusHistoryEntryWithActor {
    pub id: DbId,
    pub order_id: DbId,
    pub previous_status: Option<String>,
    pub new_status: String,
    pub changed_by: Option<DbId>,
    pub changed_by_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending a history row.
#[derive(Debug)]
pub struct CreateStatusHistoryEntry {
    pub order_id: DbId,
    pub previous_status: Option<String>,
    pub new_status: String,
    pub changed_by: Option<DbId>,
    pub notes: Option<String>,
}
