//! Order API Handlers
//!
//! 下单接口不区分「创建」和「追加」：引擎决定是否合并进开单桶，
//! 响应中的 `merged` 标志告知客户端走了哪条路径。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::utils::{AppError, ApiResponse, AppResult, ok, ok_with_message};
use shared::order::{ItemStatus, Order, PlaceOrderInput};

const RESOURCE: &str = "orders";

/// 下单响应
#[derive(Debug, Serialize)]
pub struct PlacedOrder {
    /// 是否合并进了已有订单
    pub merged: bool,
    pub order: Order,
}

#[derive(Debug, Deserialize)]
pub struct VenueQuery {
    pub venue_id: String,
}

#[derive(Debug, Deserialize)]
pub struct TableQuery {
    pub venue_id: String,
    pub table_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VersionQuery {
    pub expected_version: Option<u64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetQuantityRequest {
    #[validate(range(min = 1))]
    pub new_quantity: u32,
    /// 显式行价覆盖（缺省按单价缩放）
    pub explicit_price: Option<f64>,
    pub expected_version: Option<u64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetStatusRequest {
    /// pending | preparing | delivered | paid | cancelled
    #[validate(length(min = 1, max = 20))]
    pub new_status: String,
    pub expected_version: Option<u64>,
}

/// POST /api/orders - 下单（合并或创建）
pub async fn place(
    State(state): State<ServerState>,
    Json(payload): Json<PlaceOrderInput>,
) -> AppResult<Json<ApiResponse<PlacedOrder>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (order, merged) = state.orders.place_order(payload)?;
    state.bump_version(RESOURCE);

    let message = if merged { "Order merged" } else { "Order created" };
    Ok(ok_with_message(PlacedOrder { merged, order }, message))
}

/// GET /api/orders?venue_id= - 场馆的全部在制订单
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<VenueQuery>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = state.orders.list_orders(&query.venue_id)?;
    Ok(ok(orders))
}

/// GET /api/orders/{id} - 订单详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.orders.get_order(&id)?;
    Ok(ok(order))
}

/// DELETE /api/orders/by-table?venue_id=&table_id= - 按桌删除订单
pub async fn delete_by_table(
    State(state): State<ServerState>,
    Query(query): Query<TableQuery>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.orders.delete_by_table(&query.venue_id, &query.table_id)?;
    state.bump_version(RESOURCE);
    Ok(ok_with_message(order, "Order deleted"))
}

/// PUT /api/orders/{id}/items/{item_id}/quantity - 修改条目数量
pub async fn set_quantity(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<SetQuantityRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let order = state.orders.set_quantity(
        &id,
        &item_id,
        payload.new_quantity,
        payload.explicit_price,
        payload.expected_version,
    )?;
    state.bump_version(RESOURCE);
    Ok(ok(order))
}

/// PUT /api/orders/{id}/items/{item_id}/status - 推进条目状态
pub async fn set_status(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<SetStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let status: ItemStatus = payload
        .new_status
        .parse()
        .map_err(|e: shared::order::ParseItemStatusError| AppError::validation(e.to_string()))?;

    let order = state
        .orders
        .set_status(&id, &item_id, status, payload.expected_version)?;
    state.bump_version(RESOURCE);
    Ok(ok(order))
}

/// DELETE /api/orders/{id}/items/{item_id} - 移除条目
///
/// 移除最后一个条目时整个订单被删除，`data` 为 null。
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Query(query): Query<VersionQuery>,
) -> AppResult<Json<ApiResponse<Option<Order>>>> {
    let remaining = state
        .orders
        .remove_item(&id, &item_id, query.expected_version)?;
    state.bump_version(RESOURCE);

    let message = if remaining.is_some() { "Item removed" } else { "Order deleted" };
    Ok(ok_with_message(remaining, message))
}

/// DELETE /api/orders/{id}/items/{item_id}/addons/{addon_id} - 移除加料
pub async fn remove_addon(
    State(state): State<ServerState>,
    Path((id, item_id, addon_id)): Path<(String, String, String)>,
    Query(query): Query<VersionQuery>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .orders
        .remove_addon(&id, &item_id, &addon_id, query.expected_version)?;
    state.bump_version(RESOURCE);
    Ok(ok(order))
}
