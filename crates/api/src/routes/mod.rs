pub mod admin;
pub mod auth;
pub mod freelancers;
pub mod health;
pub mod orders;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                WebSocket order change feed
///
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
/// /auth/me                           current profile
///
/// /orders                            list (role-filtered), create
/// /orders/{id}                       get (owner or admin)
/// /orders/{id}/status                update status (admin only)
/// /orders/{id}/history               status audit trail
/// /orders/{id}/files                 multipart upload
/// /orders/{id}/revisions             list, deliver (admin only)
///
/// /freelancers                       list, create (admin only)
/// /freelancers/{id}                  update, delete (admin only)
///
/// /admin/users                       list (admin only)
/// /admin/users/{id}/role             change role (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/orders", orders::router())
        .nest("/freelancers", freelancers::router())
        .nest("/admin", admin::router())
}
