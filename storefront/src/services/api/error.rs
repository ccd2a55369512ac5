//! # API Errors
//!
//! Normalized failures of the REST client plus the per-operation fallback
//! messages used when the server does not explain itself.

use thiserror::Error;

/// Failure of one API call.
///
/// `Request` carries the message shown to the user: the body's `error`
/// field when present, otherwise the operation's fallback. `status` is
/// `None` for transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP 401. The stored token has already been removed.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{message}")]
    Request { message: String, status: Option<u16> },
}

impl ApiError {
    pub fn request(message: impl Into<String>, status: Option<u16>) -> Self {
        ApiError::Request {
            message: message.into(),
            status,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Request { status, .. } => *status,
        }
    }
}

/// Every call the client makes, used for logging and fallback messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    Login,
    Signup,
    ListProducts,
    AddProduct,
    DeleteProduct,
    Purchase,
    ListTransactions,
    UpdateTransaction,
    DeleteTransaction,
    ListUsers,
    CurrentUser,
}

impl ApiOperation {
    pub fn name(&self) -> &'static str {
        match self {
            ApiOperation::Login => "login",
            ApiOperation::Signup => "signup",
            ApiOperation::ListProducts => "list_products",
            ApiOperation::AddProduct => "add_product",
            ApiOperation::DeleteProduct => "delete_product",
            ApiOperation::Purchase => "purchase",
            ApiOperation::ListTransactions => "list_transactions",
            ApiOperation::UpdateTransaction => "update_transaction",
            ApiOperation::DeleteTransaction => "delete_transaction",
            ApiOperation::ListUsers => "list_users",
            ApiOperation::CurrentUser => "current_user",
        }
    }

    /// Message used when the response carries no `error` field
    pub fn fallback_message(&self) -> &'static str {
        match self {
            ApiOperation::Login => "Login failed",
            ApiOperation::Signup => "Signup failed",
            ApiOperation::ListProducts => "Failed to fetch products",
            ApiOperation::AddProduct => "Failed to add product",
            ApiOperation::DeleteProduct => "Failed to delete product",
            ApiOperation::Purchase => "Failed to purchase product",
            ApiOperation::ListTransactions => "Failed to fetch transactions",
            ApiOperation::UpdateTransaction => "Failed to update transaction",
            ApiOperation::DeleteTransaction => "Failed to delete transaction",
            ApiOperation::ListUsers => "Failed to fetch users",
            ApiOperation::CurrentUser => "Failed to fetch user data",
        }
    }

    pub(crate) fn fallback(&self, status: Option<u16>) -> ApiError {
        ApiError::request(self.fallback_message(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_displays_message_only() {
        let err = ApiError::request("Not enough stock available", Some(400));
        assert_eq!(err.to_string(), "Not enough stock available");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_fallback_messages() {
        assert_eq!(ApiOperation::Purchase.fallback_message(), "Failed to purchase product");
        assert_eq!(ApiOperation::CurrentUser.fallback_message(), "Failed to fetch user data");
        assert_eq!(
            ApiOperation::ListProducts.fallback(None),
            ApiError::request("Failed to fetch products", None)
        );
    }
}
