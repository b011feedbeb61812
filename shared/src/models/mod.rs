//! Data models
//!
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix millis.

pub mod dining_table;
pub mod menu;
pub mod order;
pub mod payment;
pub mod prep_sector;
pub mod tenant;

// Re-exports
pub use dining_table::*;
pub use menu::*;
pub use order::*;
pub use payment::*;
pub use prep_sector::*;
pub use tenant::*;
