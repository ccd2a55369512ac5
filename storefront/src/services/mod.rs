//! # External Services
//!
//! - [`api`]: HTTP client for the storefront REST API
//! - [`storage`]: Key-value persistence (auth token, preferences)

pub mod api;
pub mod storage;
