//! Prep Sector Model

use serde::{Deserialize, Serialize};

/// Preparation area (厨房、吧台等) that works a subset of line items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct PrepSector {
    pub id: i64,
    pub tenant_id: i64,
    /// Stable code, unique per tenant (e.g. "KITCHEN", "BAR")
    pub code: String,
    pub name: String,
    pub is_active: bool,
}
