//! Request and view types of the order engine operations
//!
//! JSON field names are camelCase; money is a JSON number with two decimals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderItem, OrderStatusHistory, Payment, PaymentMethod};
use shared::order::{ItemStatus, Money, OrderStatus};

// ── Requests ────────────────────────────────────────────────────────

/// One requested line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub dish_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Customer order submission against a table (by QR access code)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub table_code: String,
    pub items: Vec<NewItem>,
    #[serde(default)]
    pub customer_notes: Option<String>,
    /// Tip as a percentage of the subtotal, 0..=100
    #[serde(default)]
    pub tip_percentage: Option<Decimal>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Order status change requested by staff
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    pub status: OrderStatus,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Bulk item status change from a prep console
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkItemStatusRequest {
    pub item_ids: Vec<i64>,
    pub status: ItemStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustTipRequest {
    pub tip_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseTableRequest {
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub actor: Option<String>,
}

/// Checkout rules
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutPolicy {
    /// Accept orders whose items include never-started (PENDING) ones
    pub allow_pending_items: bool,
}

// ── Views ───────────────────────────────────────────────────────────

/// Money fields of an order; `total == subtotal + vat_amount + tip_amount`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Money,
    pub vat_amount: Money,
    pub tip_amount: Money,
    pub total: Money,
}

impl OrderTotals {
    /// `None` when the total leaves the `i64` cent range
    pub fn new(subtotal: Money, vat_amount: Money, tip_amount: Money) -> Option<Self> {
        let total = subtotal.checked_add(vat_amount)?.checked_add(tip_amount)?;
        Some(Self {
            subtotal,
            vat_amount,
            tip_amount,
            total,
        })
    }

    pub fn with_tip(self, tip_amount: Money) -> Option<Self> {
        Self::new(self.subtotal, self.vat_amount, tip_amount)
    }
}

impl From<&Order> for OrderTotals {
    fn from(order: &Order) -> Self {
        Self {
            subtotal: order.subtotal,
            vat_amount: order.vat_amount,
            tip_amount: order.tip_amount,
            total: order.total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub order_id: i64,
    pub order_number: i64,
    #[serde(flatten)]
    pub totals: OrderTotals,
}

/// Item as shown on a sector ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorTicketItem {
    pub item_id: i64,
    pub dish_name: String,
    pub quantity: i64,
    pub notes: Option<String>,
    pub allergens: Vec<String>,
    pub status: ItemStatus,
}

/// One order's items of one bucket, with everything a console shows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorTicket {
    pub order_id: i64,
    pub order_number: i64,
    pub table_number: i64,
    pub table_name: Option<String>,
    pub created_at: i64,
    pub customer_notes: Option<String>,
    pub items: Vec<SectorTicketItem>,
}

/// Work queue of a prep sector, oldest ticket first in every bucket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorView {
    pub pending: Vec<SectorTicket>,
    pub in_progress: Vec<SectorTicket>,
    pub ready: Vec<SectorTicket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub id: i64,
    pub dish_id: i64,
    pub dish_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
    pub notes: Option<String>,
    pub status: ItemStatus,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            id: item.id,
            dish_id: item.dish_id,
            dish_name: item.dish_name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
            notes: item.notes.clone(),
            status: item.status,
        }
    }
}

/// Customer-facing status of one order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusView {
    pub order_id: i64,
    pub order_number: i64,
    pub table_number: i64,
    pub status: OrderStatus,
    /// Next status the items call for, when it is a legal step
    pub suggested_status: Option<OrderStatus>,
    #[serde(flatten)]
    pub totals: OrderTotals,
    pub customer_notes: Option<String>,
    pub created_at: i64,
    pub items: Vec<OrderItemView>,
    pub status_history: Vec<OrderStatusHistory>,
}

/// One open order in a checkout preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOrder {
    pub order_id: i64,
    pub order_number: i64,
    pub status: OrderStatus,
    #[serde(flatten)]
    pub totals: OrderTotals,
    pub items: Vec<OrderItemView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCheckout {
    pub table_id: i64,
    pub table_number: i64,
    pub orders: Vec<CheckoutOrder>,
    pub combined_total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableClosure {
    pub table_id: i64,
    pub orders: Vec<CheckoutOrder>,
    pub payments: Vec<Payment>,
    pub combined_total: Money,
}
