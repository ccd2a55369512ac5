//! # Application Events
//!
//! Results sent from async tasks back to the thread that owns the state.

use shared::{Product, SignupResponse, TokenResponse, Transaction, User};

use super::query::{QueryData, QueryKey};
use super::tasks::checkout::{CheckoutReport, LineOutcome};
use crate::services::api::ApiError;

/// Async task results sent to the main thread
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Token login completed
    LoginResult(Result<TokenResponse, ApiError>),
    /// Signup completed
    SignupResult(Result<SignupResponse, ApiError>),
    /// Session verification completed
    CurrentUserResult(Result<User, ApiError>),
    /// Cached query fetched
    QueryLoaded {
        key: QueryKey,
        result: Result<QueryData, ApiError>,
    },
    /// One checkout line processed (the run is still going)
    CheckoutProgress(LineOutcome),
    /// Checkout run ended
    CheckoutFinished(CheckoutReport),
    TransactionUpdated(Result<Transaction, ApiError>),
    TransactionDeleted {
        id: i64,
        result: Result<(), ApiError>,
    },
    ProductAdded(Result<Product, ApiError>),
    ProductDeleted {
        id: i64,
        result: Result<(), ApiError>,
    },
}

impl AppEvent {
    /// Whether this is the final event of the task that sent it
    pub fn completes_task(&self) -> bool {
        !matches!(self, AppEvent::CheckoutProgress(_))
    }

    /// The API failure carried by this event, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            AppEvent::LoginResult(Err(e))
            | AppEvent::SignupResult(Err(e))
            | AppEvent::CurrentUserResult(Err(e))
            | AppEvent::QueryLoaded { result: Err(e), .. }
            | AppEvent::TransactionUpdated(Err(e))
            | AppEvent::TransactionDeleted { result: Err(e), .. }
            | AppEvent::ProductAdded(Err(e))
            | AppEvent::ProductDeleted { result: Err(e), .. } => Some(e),
            AppEvent::CheckoutProgress(LineOutcome::Failed { error, .. }) => Some(error),
            AppEvent::CheckoutFinished(report) => report.error(),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::LoginResult(_) => "LoginResult",
            AppEvent::SignupResult(_) => "SignupResult",
            AppEvent::CurrentUserResult(_) => "CurrentUserResult",
            AppEvent::QueryLoaded { .. } => "QueryLoaded",
            AppEvent::CheckoutProgress(_) => "CheckoutProgress",
            AppEvent::CheckoutFinished(_) => "CheckoutFinished",
            AppEvent::TransactionUpdated(_) => "TransactionUpdated",
            AppEvent::TransactionDeleted { .. } => "TransactionDeleted",
            AppEvent::ProductAdded(_) => "ProductAdded",
            AppEvent::ProductDeleted { .. } => "ProductDeleted",
        }
    }
}
