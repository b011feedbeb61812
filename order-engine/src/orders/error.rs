use crate::db::repository::RepoError;
use crate::utils::{AppError, ErrorCode};
use thiserror::Error;

/// What a rejected transition was about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSubject {
    Order(i64),
    Item(i64),
}

impl std::fmt::Display for TransitionSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Order(id) => write!(f, "order {id}"),
            Self::Item(id) => write!(f, "item {id}"),
        }
    }
}

/// Order engine errors
///
/// Every mutating operation either commits fully or returns one of these
/// with nothing written.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Tenant not found: {0}")]
    TenantNotFound(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    #[error("Prep sector not found: {0}")]
    SectorNotFound(String),

    #[error("Dish not found: {0}")]
    DishNotFound(i64),

    #[error("Dish is not available: {0}")]
    DishUnavailable(String),

    /// Dish category is missing, has no sector, or its sector is inactive
    #[error("Dish {dish_id} has no prep sector: {reason}")]
    UnresolvedSector { dish_id: i64, reason: String },

    #[error("Invalid transition for {subject}: {from} -> {to}")]
    InvalidTransition {
        subject: TransitionSubject,
        from: String,
        to: String,
    },

    #[error("Table {0} has no open orders")]
    NoOpenOrders(i64),

    #[error("Order {order_id} has {pending} item(s) not started yet")]
    UnresolvedItems { order_id: i64, pending: usize },

    #[error("Order {order_id} is {status}")]
    OrderClosed { order_id: i64, status: String },

    #[error("Order {0} already has a payment")]
    PaymentAlreadyRecorded(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Storage(RepoError::from(err))
    }
}

impl OrderError {
    pub fn invalid_transition(
        subject: TransitionSubject,
        from: impl ToString,
        to: impl ToString,
    ) -> Self {
        OrderError::InvalidTransition {
            subject,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::TenantNotFound(_) => ErrorCode::TenantNotFound,
            OrderError::TableNotFound(_) => ErrorCode::TableNotFound,
            OrderError::OrderNotFound(_) => ErrorCode::OrderNotFound,
            OrderError::ItemNotFound(_) => ErrorCode::OrderItemNotFound,
            OrderError::SectorNotFound(_) => ErrorCode::SectorNotFound,
            OrderError::DishNotFound(_) => ErrorCode::DishNotFound,
            OrderError::DishUnavailable(_) => ErrorCode::DishUnavailable,
            OrderError::UnresolvedSector { .. } => ErrorCode::UnresolvedSector,
            OrderError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            OrderError::NoOpenOrders(_) => ErrorCode::NoOpenOrders,
            OrderError::UnresolvedItems { .. } => ErrorCode::OrderHasUnresolvedItems,
            OrderError::OrderClosed { .. } => ErrorCode::OrderClosed,
            OrderError::PaymentAlreadyRecorded(_) => ErrorCode::PaymentAlreadyRecorded,
            OrderError::Validation(_) => ErrorCode::ValidationFailed,
            OrderError::Storage(RepoError::Busy(_)) => ErrorCode::SystemBusy,
            OrderError::Storage(RepoError::Duplicate(_)) => ErrorCode::AlreadyExists,
            OrderError::Storage(RepoError::Database(_)) => ErrorCode::DatabaseError,
        }
    }
}

/// 转换为 API 错误；存储错误只记录日志，不向客户端暴露细节
impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            OrderError::Storage(e) => {
                tracing::error!(error = %e, error_code = %code, "Storage error occurred");
                AppError::new(code)
            }
            OrderError::InvalidTransition { subject, from, to } => {
                AppError::with_message(code, message)
                    .with_detail("subject", subject.to_string())
                    .with_detail("from", from)
                    .with_detail("to", to)
            }
            OrderError::ItemNotFound(id) => {
                AppError::with_message(code, message).with_detail("itemId", id)
            }
            OrderError::UnresolvedItems { order_id, pending } => {
                AppError::with_message(code, message)
                    .with_detail("orderId", order_id)
                    .with_detail("pendingItems", pending)
            }
            _ => AppError::with_message(code, message),
        }
    }
}
