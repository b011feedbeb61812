//! Order domain primitives
//!
//! - [`OrderStatus`] / [`ItemStatus`]: closed lifecycles with pure transition tables
//! - [`Money`]: integer minor units, `Decimal` only at the serialization boundary

pub mod money;
pub mod status;

pub use money::Money;
pub use status::{ItemStatus, OrderStatus, suggest_order_status};
