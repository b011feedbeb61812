//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Floor status of a table, informational only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Cleaning,
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: i64,
    pub tenant_id: i64,
    pub number: i64,
    pub name: Option<String>,
    /// QR access code, unique across all tenants
    pub access_code: String,
    pub status: TableStatus,
    pub is_active: bool,
}

impl DiningTable {
    /// Display label: the name when set, otherwise "Table <number>"
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Table {}", self.number))
    }
}
