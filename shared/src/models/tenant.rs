//! Tenant Model

use serde::{Deserialize, Serialize};

/// Tenant (one restaurant)
///
/// Every other record hangs off a tenant; callers address it by `slug`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: i64,
    pub slug: String,
    pub name: String,
    /// VAT rate in basis points (1000 = 10 %)
    pub vat_rate_bps: i64,
    /// ISO 4217 code, two-decimal currencies only
    pub currency: String,
    pub is_active: bool,
}
