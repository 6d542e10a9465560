//! Unified error codes for the restaurant backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Invoice errors
//! - 6xxx: Menu errors
//! - 7xxx: Table errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire so clients can switch on the number
/// without parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order item not found
    OrderItemNotFound = 4006,
    /// Order has no items
    OrderEmpty = 4007,

    // ==================== 5xxx: Invoice ====================
    /// Invoice not found
    InvoiceNotFound = 5001,

    // ==================== 6xxx: Menu ====================
    /// Food not found
    FoodNotFound = 6001,
    /// Food has invalid price
    FoodInvalidPrice = 6002,
    /// Menu not found
    MenuNotFound = 6101,
    /// Menu availability window does not contain the current time
    MenuWindowInvalid = 6102,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Email or phone number already registered
    EmailOrPhoneExists = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
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
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "login or password is incorrect",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Order
            ErrorCode::OrderNotFound => "order was not found",
            ErrorCode::OrderItemNotFound => "order item was not found",
            ErrorCode::OrderEmpty => "order has no items",

            // Invoice
            ErrorCode::InvoiceNotFound => "invoice was not found",

            // Menu
            ErrorCode::FoodNotFound => "food was not found",
            ErrorCode::FoodInvalidPrice => "Food has invalid price",
            ErrorCode::MenuNotFound => "menu was not found",
            ErrorCode::MenuWindowInvalid => "Kindly retype the time",

            // Table
            ErrorCode::TableNotFound => "table was not found",

            // User
            ErrorCode::UserNotFound => "user was not found",
            ErrorCode::EmailOrPhoneExists => "this email or phone number already exists",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
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
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4006 => Ok(ErrorCode::OrderItemNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),

            // Invoice
            5001 => Ok(ErrorCode::InvoiceNotFound),

            // Menu
            6001 => Ok(ErrorCode::FoodNotFound),
            6002 => Ok(ErrorCode::FoodInvalidPrice),
            6101 => Ok(ErrorCode::MenuNotFound),
            6102 => Ok(ErrorCode::MenuWindowInvalid),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::EmailOrPhoneExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
