//! Inventory API 模块

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route(
        "/{venue_id}",
        post(handler::append)
            .get(handler::list)
            .delete(handler::delete_row),
    )
}
