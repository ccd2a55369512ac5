//! # Cart Handlers
//!
//! Line edits and the checkout dialog. The purchase loop itself lives in
//! [`crate::app::tasks::checkout`].

use parking_lot::RwLock;
use shared::PaymentMethod;
use std::sync::Arc;

use crate::app::state::AppState;
use crate::app::tasks::checkout::{run_checkout, CheckoutRun};
use crate::app::tasks::TaskSpawner;
use crate::core::error::AppError;
use crate::core::service::StorefrontApi;

/// Set a line to `quantity`; out-of-range values are refused with a warning.
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_set_quantity(state: Arc<RwLock<AppState>>, product_id: i64, quantity: u32) {
    let mut state = state.write();
    if let Err(e) = state.cart.update_quantity(product_id, quantity) {
        let err = AppError::from(e);
        tracing::debug!(product_id, quantity, error = %err, "Cart quantity refused");
        state.notification.warning(err.user_message());
    }
}

/// Step a line up or down by one. Buttons are disabled at the limits, so
/// stepping past them is silently ignored.
pub(crate) fn handle_step_quantity(state: Arc<RwLock<AppState>>, product_id: i64, up: bool) {
    let mut state = state.write();
    let Some(item) = state.cart.item(product_id) else {
        return;
    };
    let allowed = if up { item.can_increment() } else { item.can_decrement() };
    if !allowed {
        return;
    }
    let quantity = if up { item.quantity + 1 } else { item.quantity - 1 };
    let _ = state.cart.update_quantity(product_id, quantity);
}

pub(crate) fn handle_remove(state: Arc<RwLock<AppState>>, product_id: i64) {
    let mut state = state.write();
    if let Some(item) = state.cart.remove(product_id) {
        tracing::info!(product_id, quantity = item.quantity, "Removed from cart");
    }
}

/// Open the checkout dialog
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_open_checkout(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    if state.cart.is_empty() {
        state.notification.info("Your cart is empty");
        return;
    }
    state.cart_view.error = None;
    state.cart_view.checkout_dialog.open();
}

pub(crate) fn handle_close_checkout(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    if state.cart_view.in_progress {
        return;
    }
    state.cart_view.checkout_dialog.close();
    state.cart_view.error = None;
}

pub(crate) fn handle_select_payment(state: Arc<RwLock<AppState>>, method: PaymentMethod) {
    state.write().cart_view.payment_method = method;
}

/// Start purchasing the cart, one line at a time
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_confirm_checkout(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn StorefrontApi>,
    tasks: &TaskSpawner,
) {
    let run = {
        let mut state = state.write();
        if state.cart_view.in_progress || state.cart.is_empty() {
            return;
        }
        let run = CheckoutRun::from_cart(&state.cart, state.cart_view.payment_method);
        state.cart_view.in_progress = true;
        state.cart_view.completed_lines = 0;
        state.cart_view.error = None;
        state.loading.show(Some("Processing purchase..."));
        run
    };

    tracing::info!(
        lines = run.lines().len(),
        payment_method = run.payment_method().as_str(),
        "Starting checkout"
    );
    let progress = tasks.sender();
    tasks.spawn("checkout", run_checkout(api, run, progress));
}
