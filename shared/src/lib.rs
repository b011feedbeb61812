//! Shared types for the order engine
//!
//! Types used by the engine and by any host application that talks to it:
//! error codes and API envelopes, persisted row models, and the order
//! domain vocabulary (lifecycle states, money).

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use order::{ItemStatus, Money, OrderStatus};
