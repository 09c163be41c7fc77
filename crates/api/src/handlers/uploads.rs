//! Multipart file upload handler for order attachments.
//!
//! Every part is validated against the upload policy before the first
//! object-store call. Uploads are sequential; if one fails, objects already
//! stored for the batch are deleted before the error is surfaced, so a
//! failed batch leaves nothing behind.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use mixdesk_core::error::CoreError;
use mixdesk_core::files::FileDescriptor;
use mixdesk_core::types::DbId;
use mixdesk_db::repositories::OrderRepo;
use mixdesk_events::{OrderEvent, EVENT_ORDER_FILES_ADDED};

use crate::error::{AppError, AppResult};
use crate::handlers::orders::ensure_order_access;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// One fully-read multipart file, validated but not yet stored.
struct PendingFile {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// POST /api/v1/orders/{id}/files
///
/// Attach one or more files to an order. Owner or admin only.
pub async fn upload_order_files(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    ensure_order_access(&state.pool, &auth, order_id).await?;

    let pending = read_and_validate_parts(&state, multipart).await?;
    if pending.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No files provided".into(),
        )));
    }

    let descriptors = store_batch(&state, &auth, order_id, pending).await?;

    let files_json = serde_json::to_value(&descriptors)
        .map_err(|e| AppError::InternalError(format!("Descriptor serialization error: {e}")))?;

    let order = OrderRepo::append_files(&state.pool, order_id, &files_json)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Order",
                id: order_id,
            })
        })?;

    let event = OrderEvent::new(EVENT_ORDER_FILES_ADDED, order_id)
        .with_actor(auth.user_id)
        .with_payload(serde_json::json!({ "count": descriptors.len() }));
    state.event_bus.publish(event);

    tracing::info!(
        order_id,
        user_id = auth.user_id,
        count = descriptors.len(),
        "Files attached to order"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// Read every multipart field into memory and validate against the upload
/// policy. Returns an error before any object-store interaction if any
/// part is invalid.
async fn read_and_validate_parts(
    state: &AppState,
    mut multipart: Multipart,
) -> AppResult<Vec<PendingFile>> {
    let mut pending = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("Multipart field missing a file name".into()))?;
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file '{name}': {e}")))?
            .to_vec();

        state
            .upload_policy
            .validate(&name, &content_type, bytes.len() as u64)
            .map_err(|rejection| {
                AppError::Core(CoreError::Validation(rejection.to_string()))
            })?;

        pending.push(PendingFile {
            name,
            content_type,
            bytes,
        });
    }

    Ok(pending)
}

/// Store validated files sequentially. On any failure, delete the objects
/// already stored for this batch, then surface the error.
async fn store_batch(
    state: &AppState,
    auth: &AuthUser,
    order_id: DbId,
    pending: Vec<PendingFile>,
) -> AppResult<Vec<FileDescriptor>> {
    let mut stored_paths: Vec<String> = Vec::new();
    let mut descriptors: Vec<FileDescriptor> = Vec::new();

    for file in pending {
        let path = object_path(order_id, &file.name);
        let size = file.bytes.len() as u64;

        match state
            .object_store
            .put(&path, file.bytes, &file.content_type)
            .await
        {
            Ok(stored) => {
                descriptors.push(
                    FileDescriptor::new(file.name, file.content_type, stored.url, size)
                        .with_uploader(auth.user_id, chrono::Utc::now()),
                );
                stored_paths.push(stored.path);
            }
            Err(e) => {
                tracing::warn!(
                    order_id,
                    failed_file = %file.name,
                    stored = stored_paths.len(),
                    error = %e,
                    "Upload batch failed, rolling back stored objects"
                );
                for path in &stored_paths {
                    if let Err(del_err) = state.object_store.delete(path).await {
                        tracing::error!(path, error = %del_err, "Failed to clean up object");
                    }
                }
                return Err(AppError::Storage(e));
            }
        }
    }

    Ok(descriptors)
}

/// Build the object-store path for an uploaded file: order id plus a
/// random object name that keeps the original extension.
pub fn object_path(order_id: DbId, file_name: &str) -> String {
    let object_name = uuid::Uuid::new_v4().to_string();
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("{order_id}/{object_name}.{ext}"),
        _ => format!("{order_id}/{object_name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_path_keeps_extension() {
        let path = object_path(42, "final mix.wav");
        assert!(path.starts_with("42/"));
        assert!(path.ends_with(".wav"));
    }

    #[test]
    fn object_path_without_extension() {
        let path = object_path(7, "README");
        assert!(path.starts_with("7/"));
        assert!(!path.contains('.'));
    }
}
