//! Route definitions for the `/orders` resource.
//!
//! All endpoints require authentication; write access beyond order
//! creation and file attachment is admin-only (enforced by extractor).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{orders, revisions, uploads};
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET    /                 -> list_orders (role-filtered)
/// POST   /                 -> create_order
/// GET    /{id}             -> get_order
/// PUT    /{id}/status      -> update_order_status (admin only)
/// GET    /{id}/history     -> get_status_history
/// POST   /{id}/files       -> upload_order_files
/// GET    /{id}/revisions   -> list_revisions
/// POST   /{id}/revisions   -> create_revision (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list_orders).post(orders::create_order))
        .route("/{id}", get(orders::get_order))
        .route("/{id}/status", put(orders::update_order_status))
        .route("/{id}/history", get(orders::get_status_history))
        .route("/{id}/files", post(uploads::upload_order_files))
        .route(
            "/{id}/revisions",
            get(revisions::list_revisions).post(revisions::create_revision),
        )
}
