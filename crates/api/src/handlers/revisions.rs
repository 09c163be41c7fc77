//! Handlers for delivered revisions: versioned mix/master files an admin
//! uploads against an order.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use mixdesk_core::error::CoreError;
use mixdesk_core::types::DbId;
use mixdesk_db::models::revision::{CreateRevision, Revision};
use mixdesk_db::repositories::{OrderRepo, RevisionRepo};
use mixdesk_events::{OrderEvent, EVENT_REVISION_ADDED};

use crate::error::{AppError, AppResult};
use crate::handlers::orders::ensure_order_access;
use crate::handlers::uploads::object_path;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/orders/{id}/revisions
///
/// List delivered revisions, highest version first. Owner or admin only.
pub async fn list_revisions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Revision>>>> {
    ensure_order_access(&state.pool, &auth, order_id).await?;
    let revisions = RevisionRepo::list_for_order(&state.pool, order_id).await?;
    Ok(Json(DataResponse { data: revisions }))
}

/// POST /api/v1/orders/{id}/revisions
///
/// Deliver a new revision: exactly one file plus optional notes, as
/// multipart fields `file` and `notes`. Admin only. The version number is
/// assigned server-side.
pub async fn create_revision(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    if OrderRepo::find_by_id(&state.pool, order_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        }));
    }

    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut notes: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let name = field.file_name().map(str::to_string).ok_or_else(|| {
                    AppError::BadRequest("Revision file is missing a file name".into())
                })?;
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?
                    .to_vec();
                file = Some((name, content_type, bytes));
            }
            Some("notes") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read notes: {e}")))?;
                if !text.trim().is_empty() {
                    notes = Some(text);
                }
            }
            _ => {}
        }
    }

    let (name, content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("A 'file' field is required".into()))?;

    state
        .upload_policy
        .validate(&name, &content_type, bytes.len() as u64)
        .map_err(|rejection| AppError::Core(CoreError::Validation(rejection.to_string())))?;

    let size = bytes.len() as u64;
    let path = object_path(order_id, &name);
    let stored = state.object_store.put(&path, bytes, &content_type).await?;

    let descriptor = mixdesk_core::files::FileDescriptor::new(name, content_type, stored.url, size)
        .with_uploader(admin.user_id, chrono::Utc::now());

    let create = CreateRevision {
        order_id,
        file: serde_json::to_value(&descriptor)
            .map_err(|e| AppError::InternalError(format!("Descriptor serialization error: {e}")))?,
        notes,
        uploaded_by: Some(admin.user_id),
    };
    let revision = RevisionRepo::create(&state.pool, &create).await?;

    let event = OrderEvent::new(EVENT_REVISION_ADDED, order_id)
        .with_actor(admin.user_id)
        .with_payload(serde_json::json!({ "version": revision.version }));
    state.event_bus.publish(event);

    tracing::info!(
        order_id,
        admin_id = admin.user_id,
        version = revision.version,
        "Revision delivered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: revision })))
}
