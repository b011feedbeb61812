//! Prep Sector API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::order::ItemStatus;
use shared::util::split_list;

use crate::core::ServerState;
use crate::orders::SectorView;
use crate::utils::{AppError, AppResult};

/// Query params for a sector queue
#[derive(Debug, Deserialize)]
pub struct SectorItemsQuery {
    /// Comma separated item statuses, e.g. `PENDING,READY`
    #[serde(default)]
    pub status: Option<String>,
}

impl SectorItemsQuery {
    fn statuses(&self) -> AppResult<Vec<ItemStatus>> {
        split_list(self.status.as_deref())
            .iter()
            .map(|s| s.parse::<ItemStatus>().map_err(AppError::validation))
            .collect()
    }
}

/// GET /api/tenants/:slug/sectors/:code/items?status=PENDING,READY
pub async fn items(
    State(state): State<ServerState>,
    Path((slug, code)): Path<(String, String)>,
    Query(query): Query<SectorItemsQuery>,
) -> AppResult<Json<SectorView>> {
    let statuses = query.statuses()?;
    let view = state
        .orders
        .get_items_by_sector(&slug, &code, &statuses)
        .await?;
    Ok(Json(view))
}
