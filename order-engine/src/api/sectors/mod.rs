//! Prep Sector API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new().route("/sectors/{code}/items", get(handler::items))
}
