//! Sale order handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::models::{CreateOrderRequest, OrderListQuery, OrderSummary, SaleOrder};
use crate::services::OrderService;
use crate::AppState;

/// Create a sale order
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<SaleOrder>)> {
    let service = OrderService::new(state.db.clone());
    let order = service.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders with optional branch, customer and date filters
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    let service = OrderService::new(state.db.clone());
    let orders = service.list_orders(&query).await?;
    Ok(Json(orders))
}

/// Get an order with its lines
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> AppResult<Json<SaleOrder>> {
    let service = OrderService::new(state.db.clone());
    let order = service.get_order(order_id).await?;
    Ok(Json(order))
}

/// Delete an order and its lines
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = OrderService::new(state.db.clone());
    service.delete_order(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
