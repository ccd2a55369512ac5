//! # Transaction Handlers
//!
//! Paging, filters, the quantity edit dialog and confirmed deletes.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::app::events::AppEvent;
use crate::app::state::{AppState, EditDialog};
use crate::app::tasks::TaskSpawner;
use crate::core::error::AppError;
use crate::core::service::StorefrontApi;
use crate::utils::record::TransactionField;
use crate::utils::validation::parse_quantity;

pub(crate) fn handle_page(state: Arc<RwLock<AppState>>, page: u32) {
    let mut state = state.write();
    if let Err(e) = state.transactions.pagination.set_page(page) {
        let err = AppError::from(e);
        tracing::info!(page, error = %err, "Transaction page rejected");
        state.notification.warning(err.user_message());
    }
}

pub(crate) fn handle_filter(state: Arc<RwLock<AppState>>, field: TransactionField, value: String) {
    state.write().transactions.filters.set_filter(field, value);
}

pub(crate) fn handle_clear_filters(state: Arc<RwLock<AppState>>) {
    state.write().transactions.filters.clear_filters();
}

/// Open the edit dialog prefilled with the transaction's quantity
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_edit(state: Arc<RwLock<AppState>>, transaction_id: i64) {
    let mut state = state.write();
    let Some(quantity) = state
        .queries
        .find_transaction(transaction_id)
        .map(|t| t.quantity)
    else {
        tracing::warn!(transaction_id, "Edit requested for a transaction that is not loaded");
        return;
    };
    state.transactions.edit = Some(EditDialog {
        transaction_id,
        quantity: quantity.to_string(),
        error: None,
    });
}

pub(crate) fn handle_edit_input(state: Arc<RwLock<AppState>>, value: String) {
    let mut state = state.write();
    if let Some(edit) = state.transactions.edit.as_mut() {
        edit.quantity = value;
        edit.error = None;
    }
}

pub(crate) fn handle_cancel_edit(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    if !state.transactions.update_call.is_loading() {
        state.transactions.edit = None;
    }
}

/// Send the edited quantity. Input that is not a positive whole number
/// stays in the dialog with an error and is not sent.
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_save_edit(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn StorefrontApi>,
    tasks: &TaskSpawner,
) {
    let (id, quantity) = {
        let mut guard = state.write();
        let state = &mut *guard;
        if state.transactions.update_call.is_loading() {
            return;
        }
        let Some(edit) = state.transactions.edit.as_mut() else {
            return;
        };
        let quantity = match parse_quantity(&edit.quantity).map_err(AppError::Validation) {
            Ok(quantity) => quantity,
            Err(err) => {
                tracing::debug!(error = %err, "Edit quantity rejected");
                edit.error = Some(err.user_message().to_string());
                return;
            }
        };
        let id = edit.transaction_id;
        state.transactions.update_call.start(&mut state.loading);
        (id, quantity)
    };

    tracing::info!(transaction_id = id, quantity, "Updating transaction");
    tasks.spawn("update_transaction", async move {
        AppEvent::TransactionUpdated(api.update_transaction(id, quantity).await)
    });
}

/// Ask for confirmation before deleting
pub(crate) fn handle_request_delete(state: Arc<RwLock<AppState>>, transaction_id: i64) {
    state.write().transactions.pending_delete = Some(transaction_id);
}

pub(crate) fn handle_cancel_delete(state: Arc<RwLock<AppState>>) {
    state.write().transactions.pending_delete = None;
}

/// Delete the transaction awaiting confirmation
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_confirm_delete(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn StorefrontApi>,
    tasks: &TaskSpawner,
) {
    let id = {
        let mut guard = state.write();
        let state = &mut *guard;
        if state.transactions.delete_call.is_loading() {
            return;
        }
        let Some(id) = state.transactions.pending_delete.take() else {
            return;
        };
        state.transactions.delete_call.start(&mut state.loading);
        id
    };

    tracing::info!(transaction_id = id, "Deleting transaction");
    tasks.spawn("delete_transaction", async move {
        AppEvent::TransactionDeleted {
            id,
            result: api.delete_transaction(id).await,
        }
    });
}
