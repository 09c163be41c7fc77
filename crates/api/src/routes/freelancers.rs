//! Route definitions for the `/freelancers` resource. Admin only.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::freelancers;
use crate::state::AppState;

/// Routes mounted at `/freelancers`.
///
/// ```text
/// GET    /      -> list_freelancers
/// POST   /      -> create_freelancer
/// PUT    /{id}  -> update_freelancer
/// DELETE /{id}  -> delete_freelancer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(freelancers::list_freelancers).post(freelancers::create_freelancer),
        )
        .route(
            "/{id}",
            put(freelancers::update_freelancer).delete(freelancers::delete_freelancer),
        )
}
