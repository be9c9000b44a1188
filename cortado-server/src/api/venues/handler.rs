//! Venue API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::utils::{AppError, ApiResponse, AppResult, ok};
use shared::models::VenueProfile;

const RESOURCE: &str = "venues";

/// 注册/更新场馆请求
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertVenueRequest {
    #[validate(length(min = 1, max = 200))]
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub report_email: Option<String>,
}

/// PUT /api/venues - 注册或更新场馆
pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<UpsertVenueRequest>,
) -> AppResult<Json<ApiResponse<VenueProfile>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let venue = state
        .venues
        .upsert_venue(&payload.id, &payload.name, payload.report_email)?;
    state.bump_version(RESOURCE);
    Ok(ok(venue))
}

/// GET /api/venues - 获取所有场馆
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<VenueProfile>>>> {
    let venues = state.venues.list_venues()?;
    Ok(ok(venues))
}

/// GET /api/venues/{id} - 获取单个场馆
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<VenueProfile>>> {
    let venue = state.venues.get_venue(&id)?;
    Ok(ok(venue))
}
