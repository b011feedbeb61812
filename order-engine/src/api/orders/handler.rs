//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::orders::{
    AdjustTipRequest, CreateOrderRequest, OrderCreated, OrderStatusView, OrderTotals,
    TransitionRequest,
};
use crate::utils::{ApiResponse, AppResult};

/// POST /api/tenants/:slug/orders - 顾客下单
pub async fn create(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderCreated>)> {
    let created = state.orders.create_order(&slug, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/tenants/:slug/orders/:id/status - 订单状态流转
pub async fn transition(
    State(state): State<ServerState>,
    Path((slug, id)): Path<(String, i64)>,
    Json(payload): Json<TransitionRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .orders
        .transition_order(
            &slug,
            id,
            payload.status,
            payload.actor.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;
    Ok(ApiResponse::ok())
}

/// PUT /api/tenants/:slug/orders/:id/tip - 调整小费
pub async fn adjust_tip(
    State(state): State<ServerState>,
    Path((slug, id)): Path<(String, i64)>,
    Json(payload): Json<AdjustTipRequest>,
) -> AppResult<Json<OrderTotals>> {
    let totals = state.orders.adjust_tip(&slug, id, payload.tip_amount).await?;
    Ok(Json(totals))
}

/// GET /api/tenants/:slug/tables/:code/orders/:number - 查询订单状态
pub async fn get_status(
    State(state): State<ServerState>,
    Path((slug, table_code, number)): Path<(String, String, i64)>,
) -> AppResult<Json<OrderStatusView>> {
    let view = state.orders.get_order_status(&slug, &table_code, number).await?;
    Ok(Json(view))
}
