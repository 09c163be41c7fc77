//! Repository for the `orders` table.

use sqlx::PgPool;

use mixdesk_core::types::DbId;

use crate::models::order::{CreateOrder, Order};

const COLUMNS: &str = "id, client_id, title, description, service_kind, music_style, status, \
                       price, files, deadline, created_at, updated_at";

/// Provides CRUD operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Create an order, returning the full row.
    pub async fn create(pool: &PgPool, input: &CreateOrder) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders \
             (client_id, title, description, service_kind, music_style, status, price, files, deadline) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(input.client_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.service_kind)
            .bind(&input.music_style)
            .bind(&input.status)
            .bind(input.price)
            .bind(&input.files)
            .bind(input.deadline)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every order, newest first. Admin view.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders ORDER BY created_at DESC");
        sqlx::query_as::<_, Order>(&query).fetch_all(pool).await
    }

    /// List a single client's orders, newest first.
    pub async fn list_for_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders WHERE client_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Set an order's status, bumping `updated_at`.
    ///
    /// Returns the updated row, or `None` if the order does not exist. No
    /// transition-legality check: any valid status may replace any other.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Append file descriptors to an order's `files` array, bumping
    /// `updated_at`. Descriptors are immutable; this only ever appends.
    pub async fn append_files(
        pool: &PgPool,
        id: DbId,
        new_files: &serde_json::Value,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET files = files || $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(new_files)
            .fetch_optional(pool)
            .await
    }
}
