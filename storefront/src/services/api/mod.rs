//! # Storefront API Client Module
//!
//! HTTP client for the storefront REST API (`/api` on the backend).
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs           - Module exports and documentation
//! ├── client.rs        - ApiClient, token injection, response normalization
//! ├── error.rs         - ApiError and per-operation fallback messages
//! ├── auth.rs          - Token login, signup, current user
//! ├── products.rs      - Product listing, creation, deletion, purchase
//! ├── transactions.rs  - Transaction listing, edit, delete
//! └── users.rs         - User listing (admin)
//! ```
//!
//! ## Authentication
//!
//! When a token is stored under [`crate::services::storage::TOKEN_KEY`],
//! every request carries `Authorization: Token <token>`. A 401 response
//! removes the stored token and surfaces as [`ApiError::Unauthorized`].

pub mod auth;
pub mod client;
pub mod error;
pub mod products;
pub mod transactions;
pub mod users;

pub use client::ApiClient;
pub use error::{ApiError, ApiOperation};
