//! Repository for the `revisions` table.

use sqlx::PgPool;

use mixdesk_core::types::DbId;

use crate::models::revision::{CreateRevision, Revision};

const COLUMNS: &str = "id, order_id, version, file, notes, uploaded_by, created_at";

/// Provides operations for delivered revision files.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Create a revision with the next version number for its order.
    ///
    /// The version is assigned inside the INSERT so concurrent deliveries
    /// cannot both claim the same number (the unique constraint on
    /// `(order_id, version)` backstops the race).
    pub async fn create(pool: &PgPool, input: &CreateRevision) -> Result<Revision, sqlx::Error> {
        let query = format!(
            "INSERT INTO revisions (order_id, version, file, notes, uploaded_by) \
             SELECT $1, COALESCE(MAX(version), 0) + 1, $2, $3, $4 \
             FROM revisions WHERE order_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(input.order_id)
            .bind(&input.file)
            .bind(&input.notes)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    /// List an order's revisions, highest version first.
    pub async fn list_for_order(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Vec<Revision>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM revisions WHERE order_id = $1 ORDER BY version DESC"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }
}
