//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the storefront REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Token login, signup and user records
//! - [`product`] - Catalogue products
//! - [`transaction`] - Purchases and purchase history
//! - [`page`] - Paginated list envelope shared by products and transactions
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/token/
//! Content-Type: application/json
//!
//! { "username": "alice", "password": "MyPassword123" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! { "token": "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b" }
//! ```

pub mod auth;
pub mod page;
pub mod product;
pub mod transaction;

pub use auth::*;
pub use page::*;
pub use product::*;
pub use transaction::*;
