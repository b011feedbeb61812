//! Order Models (orders, line items, status history)

use crate::order::{ItemStatus, Money, OrderStatus};
use serde::{Deserialize, Serialize};

/// Order header (订单)
///
/// Money fields are frozen at creation; only `tip_amount` (and with it
/// `total`) may change while the order is still open.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub tenant_id: i64,
    pub table_id: i64,
    pub order_number: i64,
    pub status: OrderStatus,
    pub subtotal: Money,
    pub vat_amount: Money,
    pub tip_amount: Money,
    pub total: Money,
    pub customer_notes: Option<String>,
    pub created_by: Option<String>,
    pub closed_by: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub closed_at: Option<i64>,
}

impl Order {
    /// Open means neither paid nor cancelled
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Line item; dish name and unit price are snapshots taken at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub dish_id: i64,
    /// Copied from the dish's category at creation, never changes
    pub prep_sector_id: i64,
    pub dish_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub notes: Option<String>,
    pub status: ItemStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl OrderItem {
    /// Lines are rejected at creation when the product overflows
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_mul(self.quantity)
    }
}

/// Audit row written for every order status change
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusHistory {
    pub id: i64,
    pub order_id: i64,
    /// `None` on the creation row
    pub from_status: Option<OrderStatus>,
    pub to_status: OrderStatus,
    pub actor: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
}
