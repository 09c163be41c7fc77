//! Repository for the `status_history` table.
//!
//! Append-only: there is no update or delete here by design.

use sqlx::PgPool;

use mixdesk_core::types::DbId;

use crate::models::status_history::{
    CreateStatusHistoryEntry, StatusHistoryEntry, StatusHistoryEntryWithActor,
};

const COLUMNS: &str =
    "id, order_id, previous_status, new_status, changed_by, notes, created_at";

/// Provides append and read operations for the status audit trail.
pub struct StatusHistoryRepo;

impl StatusHistoryRepo {
    /// Append a transition entry, returning the full row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStatusHistoryEntry,
    ) -> Result<StatusHistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO status_history \
             (order_id, previous_status, new_status, changed_by, notes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StatusHistoryEntry>(&query)
            .bind(input.order_id)
            .bind(&input.previous_status)
            .bind(&input.new_status)
            .bind(input.changed_by)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// List an order's history newest first, each entry joined with the
    /// acting user's display name (NULL for system-initiated entries).
    pub async fn list_for_order(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Vec<StatusHistoryEntryWithActor>, sqlx::Error> {
        sqlx::query_as::<_, StatusHistoryEntryWithActor>(
            "SELECT h.id, h.order_id, h.previous_status, h.new_status, h.changed_by, \
                    u.full_name AS changed_by_name, h.notes, h.created_at \
             FROM status_history h \
             LEFT JOIN users u ON u.id = h.changed_by \
             WHERE h.order_id = $1 \
             ORDER BY h.created_at DESC",
        )
        .bind(order_id)
        .fetch_all(pool)
        .await
    }
}
