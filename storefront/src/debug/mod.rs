//! # Logging
//!
//! File-based structured logging. The binary calls [`init`] once at
//! startup; library code only emits `tracing` events.
//!
//! ```rust,no_run
//! use storefront::config::ClientConfig;
//!
//! let config = ClientConfig::from_env();
//! storefront::debug::init(&config);
//! tracing::info!(api_url = %config.api_url, "Storefront starting");
//! ```

pub mod logger;

pub use logger::init;
