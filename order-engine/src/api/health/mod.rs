//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 存活检查 + 数据库 ping |

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// 健康检查响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// healthy | degraded
    status: &'static str,
    version: &'static str,
    /// 数据库是否可用
    database: bool,
}

/// GET /health
///
/// 数据库不可用时返回 503
pub async fn health(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.db.ping().await;
    let status = if database {
        StatusCode::OK
    } else {
        tracing::warn!("Health check: database ping failed");
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(HealthResponse {
            status: if database { "healthy" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}
