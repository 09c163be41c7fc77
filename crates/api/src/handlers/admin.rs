//! Admin user-management handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use mixdesk_core::error::CoreError;
use mixdesk_core::roles::validate_role;
use mixdesk_core::types::DbId;
use mixdesk_db::models::user::Profile;
use mixdesk_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// GET /api/v1/admin/users
///
/// List every account's public profile, newest first.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    let profiles = UserRepo::list_profiles(&state.pool).await?;
    Ok(Json(DataResponse { data: profiles }))
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Change a user's role.
pub async fn update_user_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<DataResponse<Profile>>> {
    validate_role(&input.role).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let updated = UserRepo::update_role(&state.pool, user_id, &input.role).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }

    let profile = UserRepo::find_profile(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: user_id,
            })
        })?;

    tracing::info!(
        user_id,
        admin_id = admin.user_id,
        role = %input.role,
        "User role updated"
    );

    Ok(Json(DataResponse { data: profile }))
}
