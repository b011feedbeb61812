//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::TenantNotFound
            | Self::OrderNotFound
            | Self::OrderItemNotFound
            | Self::DishNotFound
            | Self::SectorNotFound
            | Self::TableNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (state machine refusals, caller decides whether it already happened)
            Self::AlreadyExists
            | Self::InvalidTransition
            | Self::NoOpenOrders
            | Self::OrderHasUnresolvedItems
            | Self::OrderClosed
            | Self::PaymentAlreadyRecorded => StatusCode::CONFLICT,

            // 422 Unprocessable (menu data cannot satisfy the request)
            Self::DishUnavailable | Self::UnresolvedSector => StatusCode::UNPROCESSABLE_ENTITY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::SystemBusy => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::ValidationFailed => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(ErrorCode::TableNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::InvalidTransition.http_status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::NoOpenOrders.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::UnresolvedSector.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ErrorCode::ValidationFailed.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::PaymentAlreadyRecorded.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::SystemBusy.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
