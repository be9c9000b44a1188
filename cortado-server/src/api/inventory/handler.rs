//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::utils::{AppError, ApiResponse, AppResult, ok, ok_with_message};
use shared::models::{InventoryBucket, InventoryRow, InventoryRowInput};

const RESOURCE: &str = "inventory";

/// 追加库存行请求
#[derive(Debug, Deserialize, Validate)]
pub struct AppendRowsRequest {
    /// 月份标签，如 "March 2025"
    #[validate(length(min = 1, max = 100))]
    pub month: String,
    pub rows: Vec<InventoryRowInput>,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRowQuery {
    pub month: String,
    pub row_id: i64,
}

/// POST /api/inventory/{venue_id} - 追加库存行
pub async fn append(
    State(state): State<ServerState>,
    Path(venue_id): Path<String>,
    Json(payload): Json<AppendRowsRequest>,
) -> AppResult<Json<ApiResponse<InventoryBucket>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let bucket = state
        .inventory
        .append_rows(&venue_id, &payload.month, payload.rows)?;
    state.bump_version(RESOURCE);
    Ok(ok_with_message(bucket, "Inventory rows appended"))
}

/// GET /api/inventory/{venue_id}?month= - 某月全部库存行
pub async fn list(
    State(state): State<ServerState>,
    Path(venue_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<ApiResponse<Vec<InventoryRow>>>> {
    let rows = state.inventory.list_rows(&venue_id, &query.month)?;
    Ok(ok(rows))
}

/// DELETE /api/inventory/{venue_id}?month=&row_id= - 删除单行
pub async fn delete_row(
    State(state): State<ServerState>,
    Path(venue_id): Path<String>,
    Query(query): Query<DeleteRowQuery>,
) -> AppResult<Json<ApiResponse<bool>>> {
    state
        .inventory
        .delete_row(&venue_id, &query.month, query.row_id)?;
    state.bump_version(RESOURCE);
    Ok(ok_with_message(true, "Inventory row deleted"))
}
