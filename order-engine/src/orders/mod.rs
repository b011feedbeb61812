//! Order engine
//!
//! - **manager**: `OrdersManager`, the tenant-scoped entry point; one
//!   transaction per operation
//! - **lifecycle**: order creation and order status transitions
//! - **items**: all-or-nothing item status updates
//! - **dispatch**: dish → prep sector routing and sector work queues
//! - **checkout**: table previews and table closure
//! - **numbering**: per-tenant gap-free order numbers
//!
//! # Data Flow
//!
//! ```text
//! HTTP handler → OrdersManager → begin_write (write_guard bump)
//!                      ↓
//!        lifecycle / items / checkout → repositories (SQLite)
//!                      ↓
//!                commit or roll back
//! ```

pub mod checkout;
pub mod dispatch;
pub mod error;
pub mod items;
pub mod lifecycle;
pub mod manager;
pub mod numbering;
pub mod types;

// Re-exports
pub use error::{OrderError, TransitionSubject};
pub use manager::OrdersManager;
pub use types::{
    AdjustTipRequest, BulkItemStatusRequest, CheckoutOrder, CheckoutPolicy, CloseTableRequest,
    CreateOrderRequest, NewItem, OrderCreated, OrderItemView, OrderStatusView, OrderTotals,
    SectorTicket, SectorTicketItem, SectorView, TableCheckout, TableClosure, TransitionRequest,
};
