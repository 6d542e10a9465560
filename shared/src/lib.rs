//! Shared types for the restaurant backend
//!
//! Error codes, the unified [`AppError`] type and its HTTP mapping. Kept in a
//! separate crate so API clients can decode error bodies without depending on
//! the server.

pub mod error;

// Re-exports
pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
