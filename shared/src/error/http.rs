//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found (missing resource or unresolved reference)
            Self::NotFound
            | Self::OrderNotFound
            | Self::OrderItemNotFound
            | Self::InvoiceNotFound
            | Self::FoodNotFound
            | Self::MenuNotFound
            | Self::TableNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::EmailOrPhoneExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::TimeoutError
            | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and malformed input)
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::OrderEmpty
            | Self::FoodInvalidPrice
            | Self::MenuWindowInvalid => StatusCode::BAD_REQUEST,
        }
    }
}
