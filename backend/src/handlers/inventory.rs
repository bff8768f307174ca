//! Inventory handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::models::{AdjustStockRequest, InventoryRecord, LowStockQuery, SetStockRequest};
use crate::services::InventoryService;
use crate::AppState;
use shared::validation;

/// Get stock for a (branch, product) pair
pub async fn get_inventory(
    State(state): State<AppState>,
    Path((branch_id, product_id)): Path<(i64, i64)>,
) -> AppResult<Json<InventoryRecord>> {
    let service = InventoryService::new(state.db.clone());
    let record = service.get_available(branch_id, product_id).await?;
    Ok(Json(record))
}

/// Apply a signed stock correction
pub async fn adjust_inventory(
    State(state): State<AppState>,
    Path((branch_id, product_id)): Path<(i64, i64)>,
    Json(input): Json<AdjustStockRequest>,
) -> AppResult<Json<InventoryRecord>> {
    let service = InventoryService::new(state.db.clone());
    let record = service.adjust(branch_id, product_id, input.delta).await?;
    Ok(Json(record))
}

/// Set an absolute stock count, creating the record if needed
pub async fn set_inventory_count(
    State(state): State<AppState>,
    Path((branch_id, product_id)): Path<(i64, i64)>,
    Json(input): Json<SetStockRequest>,
) -> AppResult<Json<InventoryRecord>> {
    let service = InventoryService::new(state.db.clone());
    let record = service
        .create_or_update_count(branch_id, product_id, input.quantity)
        .await?;
    Ok(Json(record))
}

/// List stock records of a branch
pub async fn list_branch_inventory(
    State(state): State<AppState>,
    Path(branch_id): Path<i64>,
) -> AppResult<Json<Vec<InventoryRecord>>> {
    let service = InventoryService::new(state.db.clone());
    let records = service.list_by_branch(branch_id).await?;
    Ok(Json(records))
}

/// Records at or below the threshold
pub async fn get_low_stock(
    State(state): State<AppState>,
    Query(query): Query<LowStockQuery>,
) -> AppResult<Json<Vec<InventoryRecord>>> {
    let threshold = query
        .min
        .unwrap_or(state.config.reporting.low_stock_threshold);
    validation::validate_threshold(threshold).map_err(|m| AppError::Validation {
        field: "min".to_string(),
        message: m.to_string(),
    })?;

    let service = InventoryService::new(state.db.clone());
    let records = service.low_stock(threshold).await?;
    Ok(Json(records))
}
