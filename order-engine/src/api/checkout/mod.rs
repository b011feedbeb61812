//! Checkout API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /tables/{table}/checkout | GET | 结账预览 (不修改数据) |
//! | /tables/{table}/checkout | POST | 关台：逐单付款并标记 PAID |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new().route(
        "/tables/{table}/checkout",
        get(handler::preview).post(handler::close),
    )
}
