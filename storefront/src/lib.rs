//! # Storefront Client - Library Root
//!
//! A **headless storefront client** for the storefront REST API. This
//! library crate contains all modules used by the binary crate (`main.rs`).
//!
//! ## Features
//!
//! - **Catalogue**: Paginated products with debounced search and sorting
//! - **Cart & Checkout**: Stock-bounded cart, sequential per-line purchases
//! - **Transaction History**: Filter, edit quantity, delete
//! - **Admin Panel**: Add/delete products, list users (staff only)
//! - **Session**: Token persisted on disk, verified on restore, hard logout on 401
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              storefront (this crate)                   │
//! ├────────────────────────────────────────────────────────┤
//! │  app        - State, actions, async tasks, query cache │
//! │  ui         - Render tree per screen, text renderer    │
//! │  services   - Reqwest API client, key-value storage    │
//! │  utils      - Forms, pagination, sort, search, ...     │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTP (Authorization: Token <token>)
//!          ▼
//! ┌─────────────────┐
//! │ Storefront API  │
//! └─────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: [`app::App`] orchestrator, [`app::AppState`], handlers and tasks
//! - **config**: [`config::ClientConfig`] from the environment / `.env`
//! - **core**: Error types and the [`core::StorefrontApi`] trait
//! - **debug**: File logging setup
//! - **services**: HTTP client and storage backends
//! - **ui**: [`ui::view`] builds a [`ui::node::Node`] tree for the current route
//! - **utils**: Self-contained state helpers
//!
//! Screens never call the API directly: they emit [`ui::action::Action`]s,
//! the app spawns tasks, and tasks report back through [`app::AppEvent`]s.

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod ui;
pub mod utils;
