// HTTP handlers for order endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::middleware::{AdminUser, AuthenticatedUser};
use crate::error::ApiError;
use crate::orders::models::{CreateOrderRequest, Order, PaymentResultRequest};
use crate::AppState;

/// POST /api/orders
pub async fn create_order_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.order_service.create_order(user.id, request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders/mine
pub async fn my_orders_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.order_service.my_orders(user.id).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_order_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let order = state.order_service.get_order(id, &user).await?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/pay
pub async fn pay_order_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payment): Json<PaymentResultRequest>,
) -> Result<Json<Order>, ApiError> {
    let order = state.order_service.pay_order(id, &user, payment).await?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/deliver (admin)
pub async fn deliver_order_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let order = state.order_service.deliver_order(id).await?;
    Ok(Json(order))
}

/// GET /api/orders (admin)
pub async fn list_orders_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.order_service.list_orders().await?;
    Ok(Json(orders))
}
