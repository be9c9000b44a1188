//! Venue API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/venues", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", put(handler::upsert).get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}
