//! Order Item API 模块

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new().route("/items/status", post(handler::bulk_update_status))
}
