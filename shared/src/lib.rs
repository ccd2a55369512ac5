//! # Storefront Data Transfer Objects
//!
//! This library defines the contract between the storefront client and the
//! storefront REST API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login, signup and user DTOs
//!   - **[`dto::product`]**: Catalogue products and the admin "new product" form
//!   - **[`dto::transaction`]**: Purchases, payment methods and statuses
//!   - **[`dto::page`]**: Paginated list envelope
//! - **[`utils`]**: Display helpers shared by every screen
//!
//! ## Wire Format
//!
//! - Field names are **snake_case** on both sides
//! - Money is [`rust_decimal::Decimal`]; the API sends it as a JSON string
//!   (`"19.99"`) but plain numbers are accepted too
//! - Enums travel as upper-case strings (`"APP"`, `"COMPLETED"`)
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::page::Page;
//! use shared::dto::product::Product;
//!
//! let body = r#"{"count":1,"next":null,"previous":null,
//!   "results":[{"id":1,"name":"Mug","price":"4.50","quantity":3}]}"#;
//! let page: Page<Product> = serde_json::from_str(body).unwrap();
//! assert_eq!(page.results[0].name, "Mug");
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
