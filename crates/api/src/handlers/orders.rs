//! Handlers for the `/orders` resource: creation, role-filtered listing,
//! the status mutation endpoint, and the status history read.
//!
//! The status mutation is the only write path for `orders.status`. It
//! appends the audit row and publishes the change event in the same
//! handler so every successful mutation is observable on the feed.

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use mixdesk_core::error::CoreError;
use mixdesk_core::roles::ROLE_ADMIN;
use mixdesk_core::services::ServiceKind;
use mixdesk_core::status::{validate_status, OrderStatus};
use mixdesk_core::types::{DbId, Timestamp};
use mixdesk_db::models::order::{CreateOrder, Order};
use mixdesk_db::models::status_history::CreateStatusHistoryEntry;
use mixdesk_db::repositories::{OrderRepo, StatusHistoryRepo};
use mixdesk_events::{OrderEvent, EVENT_ORDER_CREATED, EVENT_ORDER_STATUS_CHANGED};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /orders`.
///
/// No price field: the price always comes from the service-kind table.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub title: String,
    pub description: Option<String>,
    pub service_kind: String,
    pub music_style: String,
    pub deadline: Option<Timestamp>,
}

/// Request body for `PUT /orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch an order and verify the caller may see it (admin or owner).
pub async fn ensure_order_access(
    pool: &sqlx::PgPool,
    user: &AuthUser,
    order_id: DbId,
) -> AppResult<Order> {
    let order = OrderRepo::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Order",
                id: order_id,
            })
        })?;

    if user.role != ROLE_ADMIN && order.client_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this order".into(),
        )));
    }

    Ok(order)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/orders
///
/// Create an order for the authenticated user. The price is derived from
/// the service kind, the status starts at `new`, and the creation is
/// recorded in the status history with a null previous status.
pub async fn create_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateOrderRequest>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title is required".into(),
        )));
    }
    if input.music_style.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "music_style is required".into(),
        )));
    }
    let kind = ServiceKind::from_str(&input.service_kind)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let create = CreateOrder {
        client_id: auth.user_id,
        title: input.title.trim().to_string(),
        description: input.description,
        service_kind: kind.as_str().to_string(),
        music_style: input.music_style.trim().to_string(),
        status: OrderStatus::New.as_str().to_string(),
        price: kind.price(),
        files: serde_json::json!([]),
        deadline: input.deadline,
    };
    let order = OrderRepo::create(&state.pool, &create).await?;

    // Creation entry: previous status is NULL, by definition.
    let history = CreateStatusHistoryEntry {
        order_id: order.id,
        previous_status: None,
        new_status: order.status.clone(),
        changed_by: Some(auth.user_id),
        notes: None,
    };
    StatusHistoryRepo::create(&state.pool, &history).await?;

    let event = OrderEvent::new(EVENT_ORDER_CREATED, order.id)
        .with_actor(auth.user_id)
        .with_payload(serde_json::json!({
            "status": order.status.clone(),
            "service_kind": order.service_kind.clone(),
        }));
    state.event_bus.publish(event);

    tracing::info!(
        order_id = order.id,
        client_id = auth.user_id,
        service_kind = %order.service_kind,
        price = order.price,
        "Order created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// GET /api/v1/orders
///
/// List orders visible to the caller, newest first. Admins see every
/// order; clients see only their own.
pub async fn list_orders(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Order>>>> {
    let orders = if auth.role == ROLE_ADMIN {
        OrderRepo::list_all(&state.pool).await?
    } else {
        OrderRepo::list_for_client(&state.pool, auth.user_id).await?
    };
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/v1/orders/{id}
///
/// Fetch a single order. Owner or admin only.
pub async fn get_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Order>>> {
    let order = ensure_order_access(&state.pool, &auth, order_id).await?;
    Ok(Json(DataResponse { data: order }))
}

/// PUT /api/v1/orders/{id}/status
///
/// Set an order's status. Admin only. The submitted value must be a member
/// of the status set; beyond membership there is no transition-legality
/// check -- moving backward or skipping steps is allowed.
pub async fn update_order_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<Order>>> {
    validate_status(&input.status)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let previous = OrderRepo::find_by_id(&state.pool, order_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Order",
                id: order_id,
            })
        })?;

    let updated = OrderRepo::update_status(&state.pool, order_id, &input.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Order",
                id: order_id,
            })
        })?;

    let previous_status = previous.status;

    let history = CreateStatusHistoryEntry {
        order_id,
        previous_status: Some(previous_status.clone()),
        new_status: updated.status.clone(),
        changed_by: Some(admin.user_id),
        notes: input.notes,
    };
    StatusHistoryRepo::create(&state.pool, &history).await?;

    let event = OrderEvent::new(EVENT_ORDER_STATUS_CHANGED, order_id)
        .with_actor(admin.user_id)
        .with_payload(serde_json::json!({
            "previous_status": previous_status.clone(),
            "new_status": updated.status.clone(),
        }));
    state.event_bus.publish(event);

    tracing::info!(
        order_id,
        admin_id = admin.user_id,
        previous_status = %previous_status,
        new_status = %updated.status,
        "Order status updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/v1/orders/{id}/history
///
/// Status audit trail, newest first, with actor display names. Owner or
/// admin only.
pub async fn get_status_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_order_access(&state.pool, &auth, order_id).await?;

    let entries = StatusHistoryRepo::list_for_order(&state.pool, order_id).await?;
    Ok(Json(DataResponse { data: entries }))
}
