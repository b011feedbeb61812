//! 工具模块
//!
//! - [`AppError`] / [`ApiResponse`] - 统一错误类型 (from shared::error)
//! - [`logger`] - 日志初始化
//! - [`validation`] - 输入校验

pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
