//! Earnings API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::ledgers::ClosedOrder;
use crate::utils::{AppError, ApiResponse, AppResult, ok, ok_with_message};
use shared::models::{CloseOutcome, EarningsEntry, PaymentMethod};

const RESOURCE: &str = "earnings";

/// 关单请求
#[derive(Debug, Deserialize, Validate)]
pub struct CloseOrderRequest {
    #[validate(length(min = 1))]
    pub order_id: String,
    /// paid | cancelled
    pub outcome: String,
    /// cash | upi | card — paid 时必填
    pub payment_method: Option<String>,
}

/// POST /api/earnings/{venue_id}/close - 关单入账
pub async fn close_order(
    State(state): State<ServerState>,
    Path(venue_id): Path<String>,
    Json(payload): Json<CloseOrderRequest>,
) -> AppResult<Json<ApiResponse<ClosedOrder>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome: CloseOutcome = payload
        .outcome
        .parse()
        .map_err(|e: shared::models::ParseCloseOutcomeError| AppError::validation(e.to_string()))?;
    let method = payload
        .payment_method
        .as_deref()
        .map(|m| {
            m.parse::<PaymentMethod>()
                .map_err(|e| AppError::validation(e.to_string()))
        })
        .transpose()?;

    let closed = state
        .earnings
        .close_order(&venue_id, &payload.order_id, outcome, method)?;
    state.bump_version(RESOURCE);
    state.bump_version("orders");
    Ok(ok_with_message(closed, "Order closed"))
}

/// GET /api/earnings/{venue_id} - 收入历史（按月，时间序）
pub async fn list(
    State(state): State<ServerState>,
    Path(venue_id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<EarningsEntry>>>> {
    let entries = state.earnings.list_earnings(&venue_id)?;
    Ok(ok(entries))
}
