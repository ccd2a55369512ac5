//! # Common Error Types
//!
//! Consolidated error handling for the storefront client.
//!
//! [`AppError`] covers every failure the application layer reports. API
//! failures keep their own richer type ([`crate::services::api::ApiError`])
//! because the 401 case drives a session reset; they collapse into
//! [`AppError::Api`] once they reach code that only needs the message.
//!
//! ## Error Categories
//!
//! - **Api**: REST API failures (network, HTTP status, body parsing)
//! - **Validation**: Input validation errors (form fields, quantities)
//! - **State**: Invalid state transitions (checkout while empty, etc.)
//! - **Storage**: Key-value store failures (disk I/O, corrupt JSON)
//!
//! ## Usage Pattern
//!
//! ```rust
//! use storefront::core::error::AppError;
//!
//! fn parse_quantity(input: &str) -> Result<i64, AppError> {
//!     input
//!         .trim()
//!         .parse()
//!         .map_err(|_| AppError::Validation("Quantity must be a whole number".to_string()))
//! }
//!
//! assert!(parse_quantity("3").is_ok());
//! assert!(parse_quantity("three").is_err());
//! ```

use thiserror::Error;

use crate::app::cart::CartError;
use crate::services::api::ApiError;
use crate::services::storage::StorageError;
use crate::utils::pagination::PaginationError;

/// Application-wide error type.
///
/// Each variant carries a human readable message; `thiserror` provides the
/// `Display` and `Error` implementations.
///
/// ```rust
/// use storefront::core::error::AppError;
///
/// let err = AppError::Validation("Quantity must be greater than 0".to_string());
/// assert_eq!(err.to_string(), "Validation error: Quantity must be greater than 0");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// REST API communication error.
    #[error("API error: {0}")]
    Api(String),

    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Application state error.
    ///
    /// Raised when an action does not make sense in the current state,
    /// e.g. starting a checkout with an empty cart.
    #[error("State error: {0}")]
    State(String),

    /// Key-value store error (token, persisted preferences).
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Message without the category prefix, as shown to the user.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Api(msg)
            | AppError::Validation(msg)
            | AppError::State(msg)
            | AppError::Storage(msg) => msg,
        }
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Api(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Api(msg.to_string())
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err.to_string())
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<PaginationError> for AppError {
    fn from(err: PaginationError) -> Self {
        AppError::State(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}
