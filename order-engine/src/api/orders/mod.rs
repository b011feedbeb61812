//! Order API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /orders | POST | 顾客下单 |
//! | /orders/{id}/status | POST | 订单状态流转 |
//! | /orders/{id}/tip | PUT | 调整小费 |
//! | /tables/{table}/orders/{number} | GET | 顾客查询订单状态 (桌台码) |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/orders", post(handler::create))
        .route("/orders/{id}/status", post(handler::transition))
        .route("/orders/{id}/tip", put(handler::adjust_tip))
        .route("/tables/{table}/orders/{number}", get(handler::get_status))
}
