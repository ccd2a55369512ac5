//! # Screen Modules
//!
//! One module per route. Every screen is a pure function of the state:
//!
//! ```rust,ignore
//! pub fn view(state: &AppState) -> Node
//! ```
//!
//! - **[`auth`]**: Login and signup forms
//! - **[`products`]**: Product grid with quantity pickers, search and sort
//! - **[`cart`]**: Cart lines and the checkout dialog
//! - **[`transactions`]**: Purchase history with edit/delete dialogs
//! - **[`admin`]**: Product and user management for staff

pub mod admin;
pub mod auth;
pub mod cart;
pub mod products;
pub mod transactions;
