//! Order handlers: batch ingestion, lifecycle updates, and admin listings

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::error::{ApiError, ApiResult};
use crate::models::{
    CartItem, EnrichedCartItem, OrderItemRequest, OrderStatus, UpdateOrderRequest,
};
use crate::state::AppState;

const EMPTY_BATCH_ERROR: &str =
    "El cuerpo de la solicitud debe ser un array de productos y no puede estar vacío.";

/// Query parameters for the user order listing
#[derive(Deserialize)]
pub struct MyOrdersQuery {
    #[serde(rename = "userId")]
    pub user_id: i32,
}

/// Request body for cart enrichment
#[derive(Deserialize)]
pub struct TemporaryOrdersRequest {
    pub pedidos: Vec<CartItem>,
}

/// Response body for cart enrichment
#[derive(serde::Serialize)]
pub struct TemporaryOrdersResponse {
    pub pedidos: Vec<EnrichedCartItem>,
}

/// Submit an order batch
///
/// The body must be a non-empty array of line items. All items are
/// committed atomically: any invalid item or store failure rolls back the
/// whole batch and surfaces a single aggregate error.
pub async fn create_order_batch(
    State(state): State<AppState>,
    payload: Result<Json<Vec<OrderItemRequest>>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(items) =
        payload.map_err(|_| ApiError::BadRequest(EMPTY_BATCH_ERROR.to_string()))?;

    if items.is_empty() {
        return Err(ApiError::BadRequest(EMPTY_BATCH_ERROR.to_string()));
    }

    info!("Processing order batch of {} items", items.len());

    let inserted = state
        .order_repository
        .create_batch(&items)
        .await
        .map_err(|e| {
            error!("Order batch failed, transaction rolled back: {}", e);
            ApiError::OrderBatch(e)
        })?;

    Ok((StatusCode::CREATED, Json(inserted)))
}

/// Update an order's status and quantity
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let order = state
        .order_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update order: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Pedido no encontrado".to_string()))?;

    Ok(Json(order))
}

/// List a user's orders, excluding cancelled ones
pub async fn my_orders(
    State(state): State<AppState>,
    Query(query): Query<MyOrdersQuery>,
) -> ApiResult<impl IntoResponse> {
    let orders = state
        .order_repository
        .by_user(query.user_id)
        .await
        .map_err(|e| {
            error!("Failed to list orders: {}", e);
            ApiError::Internal(e)
        })?;

    if orders.is_empty() {
        return Err(ApiError::NotFound(
            "No se encontraron pedidos para este usuario".to_string(),
        ));
    }

    Ok(Json(orders))
}

/// Admin listing of confirmed orders
pub async fn admin_confirmed_orders(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    admin_orders_by_status(state, OrderStatus::Confirmado).await
}

/// Admin listing of pending orders
pub async fn admin_pending_orders(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    admin_orders_by_status(state, OrderStatus::Pendiente).await
}

async fn admin_orders_by_status(
    state: AppState,
    status: OrderStatus,
) -> ApiResult<Json<Vec<crate::models::AdminOrderRow>>> {
    let orders = state
        .order_repository
        .admin_by_status(status)
        .await
        .map_err(|e| {
            error!("Failed to list orders: {}", e);
            ApiError::Internal(e)
        })?;

    if orders.is_empty() {
        return Err(ApiError::NotFound("No se encontraron pedidos".to_string()));
    }

    Ok(Json(orders))
}

/// Confirm an order (admin)
pub async fn confirm_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let order = state
        .order_repository
        .confirm(id)
        .await
        .map_err(|e| {
            error!("Failed to confirm order: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Pedido no encontrado".to_string()))?;

    Ok(Json(order))
}

/// Enrich cart items with the perfume rows they reference
pub async fn enrich_temporary_orders(
    State(state): State<AppState>,
    payload: Result<Json<TemporaryOrdersRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) =
        payload.map_err(|_| ApiError::BadRequest("Formato de pedidos inválido".to_string()))?;

    if request.pedidos.is_empty() {
        return Ok(Json(TemporaryOrdersResponse { pedidos: vec![] }));
    }

    let ids: Vec<i32> = request.pedidos.iter().map(|p| p.idperfume).collect();

    let perfumes = state
        .perfume_repository
        .find_active_by_ids(&ids)
        .await
        .map_err(|e| {
            error!("Failed to enrich cart items: {}", e);
            ApiError::Internal(e)
        })?;

    let pedidos = request
        .pedidos
        .into_iter()
        .map(|item| {
            let perfume = perfumes
                .iter()
                .find(|p| p.perfume.idperfume == item.idperfume)
                .cloned();
            EnrichedCartItem { item, perfume }
        })
        .collect();

    Ok(Json(TemporaryOrdersResponse { pedidos }))
}
