//! API 路由模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 简单健康检查 |
//! | /health/detailed | GET | 详细健康检查 |
//! | /api/venues | PUT, GET | 场馆注册与列表 |
//! | /api/venues/{id} | GET | 场馆详情 |
//! | /api/orders | POST, GET | 下单(合并)与列表 |
//! | /api/orders/{id} | GET | 订单详情 |
//! | /api/orders/by-table | DELETE | 按桌删除订单 |
//! | /api/orders/{id}/items/{item_id}/quantity | PUT | 修改数量 |
//! | /api/orders/{id}/items/{item_id}/status | PUT | 推进状态 |
//! | /api/orders/{id}/items/{item_id} | DELETE | 移除条目 |
//! | /api/orders/{id}/items/{item_id}/addons/{addon_id} | DELETE | 移除加料 |
//! | /api/earnings/{venue_id}/close | POST | 关单入账 |
//! | /api/earnings/{venue_id} | GET | 收入历史 |
//! | /api/inventory/{venue_id} | POST, GET, DELETE | 库存流水 |

use axum::{Router, extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::core::ServerState;

pub mod earnings;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod venues;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};

/// 组装全部路由并挂载中间件
pub fn routes(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(venues::router())
        .merge(orders::router())
        .merge(earnings::router())
        .merge(inventory::router())
        .layer(axum::middleware::from_fn(access_log))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// 访问日志中间件
async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        target: "http_access",
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request handled"
    );
    response
}
