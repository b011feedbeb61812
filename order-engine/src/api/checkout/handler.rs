//! Checkout API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::orders::{CloseTableRequest, TableCheckout, TableClosure};
use crate::utils::AppResult;

/// GET /api/tenants/:slug/tables/:id/checkout - 结账预览
pub async fn preview(
    State(state): State<ServerState>,
    Path((slug, table_id)): Path<(String, i64)>,
) -> AppResult<Json<TableCheckout>> {
    let checkout = state.orders.preview_table(&slug, table_id).await?;
    Ok(Json(checkout))
}

/// POST /api/tenants/:slug/tables/:id/checkout - 关台
pub async fn close(
    State(state): State<ServerState>,
    Path((slug, table_id)): Path<(String, i64)>,
    Json(payload): Json<CloseTableRequest>,
) -> AppResult<Json<TableClosure>> {
    let closure = state
        .orders
        .close_table(
            &slug,
            table_id,
            payload.payment_method,
            payload.actor.as_deref(),
        )
        .await?;
    Ok(Json(closure))
}
