//! # Reusable Widgets
//!
//! Node builders shared by several screens.

pub mod forms;
pub mod nav_bar;
pub mod notifications;
pub mod pagination;
pub mod tables;
