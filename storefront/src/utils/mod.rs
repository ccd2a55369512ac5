//! # Utility Functions
//!
//! Self-contained state helpers used by the screens. None of them share
//! state between instances; time-based helpers take the current `Instant`
//! from the caller.
//!
//! ## Modules
//!
//! - **[`validation`]**: Input validation (usernames, emails, quantities)
//! - **[`form`]**: Form values, rules, touched/errors, submit gate
//! - **[`debounce`]** / **[`throttle`]**: Rate limiting of input values
//! - **[`pagination`]**: Page cursor over a server list
//! - **[`record`]**, **[`sort`]**, **[`search`]**: Field access, sorting, filtering
//! - **[`persisted`]**: Typed values in the key-value store
//! - **[`toggle`]**: Modal/focus/hover flags
//! - **[`shortcuts`]**: Keyboard bindings
//! - **[`viewport`]**: Window size breakpoints
//! - **[`api_call`]**: Mutation tracking with loading overlay and toasts

pub mod api_call;
pub mod debounce;
pub mod form;
pub mod pagination;
pub mod persisted;
pub mod record;
pub mod search;
pub mod shortcuts;
pub mod sort;
pub mod throttle;
pub mod toggle;
pub mod validation;
pub mod viewport;
