//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::place).get(handler::list))
        // by-table 必须在 /{id} 之前注册，避免路径冲突
        .route("/by-table", delete(handler::delete_by_table))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/items/{item_id}", delete(handler::remove_item))
        .route("/{id}/items/{item_id}/quantity", put(handler::set_quantity))
        .route("/{id}/items/{item_id}/status", put(handler::set_status))
        .route(
            "/{id}/items/{item_id}/addons/{addon_id}",
            delete(handler::remove_addon),
        )
}
