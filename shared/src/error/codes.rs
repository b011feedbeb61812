//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Tenant errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Menu / prep sector errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 3xxx: Tenant ====================
    /// Tenant not found or inactive
    TenantNotFound = 3002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order item not found
    OrderItemNotFound = 4006,
    /// Requested state change is not legal from the current state
    InvalidTransition = 4008,
    /// Table has no open orders to close
    NoOpenOrders = 4009,
    /// Order still has items that were never started
    OrderHasUnresolvedItems = 4010,
    /// Order is in a terminal state and can no longer be changed
    OrderClosed = 4011,

    // ==================== 5xxx: Payment ====================
    /// Payment already recorded for the order
    PaymentAlreadyRecorded = 5006,

    // ==================== 6xxx: Menu ====================
    /// Dish not found
    DishNotFound = 6001,
    /// Dish is not available or out of stock
    DishUnavailable = 6003,
    /// Prep sector not found
    SectorNotFound = 6501,
    /// Dish has no resolvable prep sector (category/sector gap)
    UnresolvedSector = 6502,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// System busy (lock contention, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Tenant
            ErrorCode::TenantNotFound => "Tenant not found",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::InvalidTransition => "Invalid status transition",
            ErrorCode::NoOpenOrders => "Table has no open orders",
            ErrorCode::OrderHasUnresolvedItems => "Order has items that were never started",
            ErrorCode::OrderClosed => "Order is closed",

            // Payment
            ErrorCode::PaymentAlreadyRecorded => "Payment already recorded for order",

            // Menu
            ErrorCode::DishNotFound => "Dish not found",
            ErrorCode::DishUnavailable => "Dish is not available",
            ErrorCode::SectorNotFound => "Prep sector not found",
            ErrorCode::UnresolvedSector => "Dish has no prep sector",

            // Table
            ErrorCode::TableNotFound => "Table not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            4 => Ok(ErrorCode::AlreadyExists),

            // Tenant
            3002 => Ok(ErrorCode::TenantNotFound),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4006 => Ok(ErrorCode::OrderItemNotFound),
            4008 => Ok(ErrorCode::InvalidTransition),
            4009 => Ok(ErrorCode::NoOpenOrders),
            4010 => Ok(ErrorCode::OrderHasUnresolvedItems),
            4011 => Ok(ErrorCode::OrderClosed),

            // Payment
            5006 => Ok(ErrorCode::PaymentAlreadyRecorded),

            // Menu
            6001 => Ok(ErrorCode::DishNotFound),
            6003 => Ok(ErrorCode::DishUnavailable),
            6501 => Ok(ErrorCode::SectorNotFound),
            6502 => Ok(ErrorCode::UnresolvedSector),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
