//! # Core Abstractions
//!
//! Error types and the service trait used for dependency injection.
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: [`StorefrontApi`], implemented by the HTTP client and
//!   by mocks in tests
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront::core::service::StorefrontApi;
//! use storefront::services::{api::ApiClient, storage::MemoryStore};
//!
//! let store = Arc::new(MemoryStore::new());
//! let api: Arc<dyn StorefrontApi> =
//!     Arc::new(ApiClient::with_base_url("http://localhost:8000/api", store));
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::StorefrontApi;
