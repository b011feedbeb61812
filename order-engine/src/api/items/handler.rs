//! Order Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::orders::BulkItemStatusRequest;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateResponse {
    pub updated: usize,
}

/// POST /api/tenants/:slug/items/status - 批量更新菜品状态 (全部成功或全部失败)
pub async fn bulk_update_status(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(payload): Json<BulkItemStatusRequest>,
) -> AppResult<Json<BulkUpdateResponse>> {
    let updated = state
        .orders
        .bulk_update_item_status(&slug, &payload.item_ids, payload.status)
        .await?;
    Ok(Json(BulkUpdateResponse { updated }))
}
