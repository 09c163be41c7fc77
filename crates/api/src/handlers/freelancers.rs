//! Handlers for the freelancer roster. All endpoints are admin-only --
//! the roster is back-office data used when assigning work.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use mixdesk_core::error::CoreError;
use mixdesk_core::types::DbId;
use mixdesk_db::models::freelancer::{CreateFreelancer, Freelancer};
use mixdesk_db::repositories::FreelancerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_freelancer(input: &CreateFreelancer) -> AppResult<()> {
    if input.full_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "full_name is required".into(),
        )));
    }
    if !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email address is required".into(),
        )));
    }
    Ok(())
}

/// GET /api/v1/freelancers
pub async fn list_freelancers(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Freelancer>>>> {
    let freelancers = FreelancerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: freelancers }))
}

/// POST /api/v1/freelancers
pub async fn create_freelancer(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateFreelancer>,
) -> AppResult<impl IntoResponse> {
    validate_freelancer(&input)?;

    let freelancer = FreelancerRepo::create(&state.pool, &input).await?;

    tracing::info!(
        freelancer_id = freelancer.id,
        admin_id = admin.user_id,
        "Freelancer added to roster"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: freelancer })))
}

/// PUT /api/v1/freelancers/{id}
pub async fn update_freelancer(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateFreelancer>,
) -> AppResult<Json<DataResponse<Freelancer>>> {
    validate_freelancer(&input)?;

    let freelancer = FreelancerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Freelancer",
                id,
            })
        })?;

    tracing::info!(freelancer_id = id, admin_id = admin.user_id, "Freelancer updated");

    Ok(Json(DataResponse { data: freelancer }))
}

/// DELETE /api/v1/freelancers/{id}
pub async fn delete_freelancer(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FreelancerRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Freelancer",
            id,
        }));
    }

    tracing::info!(freelancer_id = id, admin_id = admin.user_id, "Freelancer deleted");

    Ok(StatusCode::NO_CONTENT)
}
