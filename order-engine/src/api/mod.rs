//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`orders`] - 下单、订单状态、小费
//! - [`sectors`] - 出品部门工作队列
//! - [`items`] - 菜品状态批量更新
//! - [`checkout`] - 结账预览与关台
//!
//! 除健康检查外，所有路由都挂在 `/api/tenants/{slug}` 下，调用方已完成鉴权。

pub mod checkout;
pub mod health;
pub mod items;
pub mod orders;
pub mod sectors;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Build the API router (without state)
pub fn router() -> Router<ServerState> {
    let tenant_routes = Router::new()
        .merge(orders::routes())
        .merge(sectors::routes())
        .merge(items::routes())
        .merge(checkout::routes());

    Router::new()
        .merge(health::router())
        .nest("/api/tenants/{slug}", tenant_routes)
}
