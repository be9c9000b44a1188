//! Earnings API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/earnings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{venue_id}", get(handler::list))
        .route("/{venue_id}/close", post(handler::close_order))
}
