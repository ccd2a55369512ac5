//! # Event Handler
//!
//! Applies async task results to the application state.
//!
//! Every event takes the write lock once, briefly. A 401 on any call made
//! by a signed-in session short-circuits into a hard logout; results that
//! arrive after the session ended are dropped.

use shared::{SignupResponse, TokenResponse, User};

use crate::app::events::AppEvent;
use crate::app::handlers;
use crate::app::query::{QueryData, QueryKey, Resource};
use crate::app::state::{AuthSession, NewProductForm, Route};
use crate::app::tasks::checkout::{CheckoutReport, LineOutcome};
use crate::app::App;
use crate::services::api::ApiError;
use crate::services::storage::TOKEN_KEY;

/// Trait for event handling implementation
pub(crate) trait AppEventHandler {
    fn handle_event_impl(&mut self, event: AppEvent);
}

impl AppEventHandler for App {
    fn handle_event_impl(&mut self, event: AppEvent) {
        tracing::debug!(event = event.name(), "Handling event");
        if event.completes_task() {
            self.tasks.task_done();
        }

        let authenticated = self.state.read().is_authenticated();
        if authenticated && event.api_error().is_some_and(ApiError::is_unauthorized) {
            tracing::warn!(event = event.name(), "Request unauthorized, ending session");
            self.hard_logout();
            return;
        }

        match event {
            AppEvent::LoginResult(result) => self.handle_login_result(result),
            AppEvent::SignupResult(result) => self.handle_signup_result(result),
            AppEvent::CurrentUserResult(result) => self.handle_current_user_result(result),
            event if !authenticated => self.release_ended_session(event),
            AppEvent::QueryLoaded { key, result } => self.handle_query_loaded(key, result),
            AppEvent::CheckoutProgress(outcome) => self.handle_checkout_progress(outcome),
            AppEvent::CheckoutFinished(report) => self.handle_checkout_finished(report),
            AppEvent::TransactionUpdated(result) => {
                let mut guard = self.state.write();
                let state = &mut *guard;
                let ok = state.transactions.update_call.finish(
                    result,
                    &mut state.loading,
                    &mut state.notification,
                );
                if ok {
                    state.transactions.edit = None;
                    state.queries.invalidate(Resource::Transactions);
                    state.queries.invalidate(Resource::Products);
                } else if let Some(edit) = state.transactions.edit.as_mut() {
                    edit.error = state.transactions.update_call.error().map(ToString::to_string);
                }
            }
            AppEvent::TransactionDeleted { id, result } => {
                let mut guard = self.state.write();
                let state = &mut *guard;
                let ok = state.transactions.delete_call.finish(
                    result,
                    &mut state.loading,
                    &mut state.notification,
                );
                tracing::info!(transaction_id = id, ok, "Transaction delete finished");
                if ok {
                    state.queries.invalidate(Resource::Transactions);
                }
            }
            AppEvent::ProductAdded(result) => {
                let mut guard = self.state.write();
                let state = &mut *guard;
                let ok = state
                    .admin
                    .add_call
                    .finish(result, &mut state.loading, &mut state.notification);
                if ok {
                    state.admin.add_dialog.close();
                    state.admin.form = NewProductForm::default();
                    state.queries.invalidate(Resource::Products);
                }
            }
            AppEvent::ProductDeleted { id, result } => {
                let mut guard = self.state.write();
                let state = &mut *guard;
                let ok = state.admin.delete_call.finish(
                    result,
                    &mut state.loading,
                    &mut state.notification,
                );
                tracing::info!(product_id = id, ok, "Product delete finished");
                if ok {
                    state.queries.invalidate(Resource::Products);
                }
            }
        }
    }
}

impl App {
    /// A result for a session that has ended is not applied, but whatever
    /// it was holding (checkout lock, mutation in flight, overlay) is let go
    /// so the next session starts unblocked.
    fn release_ended_session(&mut self, event: AppEvent) {
        tracing::debug!(event = event.name(), "Dropping result for an ended session");
        let mut guard = self.state.write();
        let state = &mut *guard;
        match event {
            AppEvent::CheckoutFinished(report) => {
                tracing::info!(
                    purchased = report.purchased.len(),
                    total_lines = report.total_lines,
                    "Checkout finished after the session ended"
                );
                state.cart_view.in_progress = false;
                state.loading.hide();
            }
            AppEvent::TransactionUpdated(_) => {
                state.transactions.update_call.abandon(&mut state.loading)
            }
            AppEvent::TransactionDeleted { .. } => {
                state.transactions.delete_call.abandon(&mut state.loading)
            }
            AppEvent::ProductAdded(_) => state.admin.add_call.abandon(&mut state.loading),
            AppEvent::ProductDeleted { .. } => state.admin.delete_call.abandon(&mut state.loading),
            _ => {}
        }
    }

    fn handle_login_result(&mut self, result: Result<TokenResponse, ApiError>) {
        tracing::info!(event = "LoginResult", success = result.is_ok(), "Processing login result");
        {
            let mut state = self.state.write();
            state.loading.hide();
            state.login_form.finish_submit();
            match &result {
                Ok(_) => state.login_form.reset(),
                Err(e) => state.login_error = Some(e.to_string()),
            }
        }

        if let Ok(response) = result {
            handlers::auth::begin_session(
                self.state.clone(),
                self.storage.as_ref(),
                self.api.clone(),
                &self.tasks,
                &response.token,
            );
        }
    }

    fn handle_signup_result(&mut self, result: Result<SignupResponse, ApiError>) {
        tracing::info!(event = "SignupResult", success = result.is_ok(), "Processing signup result");
        {
            let mut state = self.state.write();
            state.loading.hide();
            state.signup_form.finish_submit();
            match &result {
                Ok(_) => state.signup_form.reset(),
                Err(e) => state.signup_error = Some(e.to_string()),
            }
        }

        if let Ok(response) = result {
            handlers::auth::begin_session(
                self.state.clone(),
                self.storage.as_ref(),
                self.api.clone(),
                &self.tasks,
                &response.token,
            );
        }
    }

    fn handle_current_user_result(&mut self, result: Result<User, ApiError>) {
        let mut state = self.state.write();
        if !state.is_authenticated() {
            return;
        }

        match result {
            Ok(user) => {
                tracing::info!(username = %user.username, is_staff = user.is_staff, "Session verified");
                state.session = AuthSession::Authenticated { user };
                state.route = state.resolve_route(state.route);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session verification failed, logging out");
                if let Err(e) = self.storage.remove(TOKEN_KEY) {
                    tracing::warn!(error = %e, "Failed to remove stored token");
                }
                state.session = AuthSession::LoggedOut;
                state.queries.clear();
                state.route = Route::Login;
            }
        }
    }

    fn handle_query_loaded(&mut self, key: QueryKey, result: Result<QueryData, ApiError>) {
        let mut state = self.state.write();
        match &result {
            Ok(QueryData::Products(page)) => {
                tracing::debug!(key = ?key, count = page.count, "Products loaded");
                if key == (QueryKey::Products { page: state.products.pagination.page() }) {
                    state.products.pagination.set_total(page.count);
                }
            }
            Ok(QueryData::Transactions(page)) => {
                tracing::debug!(key = ?key, count = page.count, "Transactions loaded");
                if key == (QueryKey::Transactions { page: state.transactions.pagination.page() }) {
                    state.transactions.pagination.set_total(page.count);
                }
            }
            Ok(QueryData::Users(users)) => {
                tracing::debug!(count = users.len(), "Users loaded");
            }
            Err(e) => tracing::warn!(key = ?key, error = %e, "Query failed"),
        }
        state.queries.complete(key, result);
    }

    fn handle_checkout_progress(&mut self, outcome: LineOutcome) {
        if let LineOutcome::Purchased { product_id, .. } = outcome {
            let mut state = self.state.write();
            state.cart_view.completed_lines += 1;
            state.queries.invalidate(Resource::Products);
            state.queries.invalidate(Resource::Transactions);
            tracing::debug!(product_id, "Checkout line purchased");
        }
    }

    fn handle_checkout_finished(&mut self, report: CheckoutReport) {
        let mut state = self.state.write();
        state.cart_view.in_progress = false;
        state.loading.hide();

        if report.is_complete() {
            state.cart.clear();
            state.cart_view.checkout_dialog.close();
            state.cart_view.error = None;
            state.notification.success("Purchase completed successfully");
        } else {
            let message = report
                .error()
                .map(ToString::to_string)
                .unwrap_or_else(|| "Checkout failed".to_string());
            state.cart_view.error = Some(message);
        }
    }
}
