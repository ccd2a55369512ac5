//! # Application Orchestrator
//!
//! The [`App`] struct owns the client state and coordinates user actions,
//! async API tasks and the events they send back.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  Dispatching thread                                    │
//! │  App::dispatch(Action) ──► handlers::* ──► AppState    │
//! │  App::on_tick() ◄── drains AppEvent ◄──┐               │
//! └────────────────────────────────────────┼───────────────┘
//!                  tokio::spawn            │ async_channel
//! ┌────────────────────────────────────────┴───────────────┐
//! │  tasks::*  (StorefrontApi calls, checkout sequencer)   │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! State lives in `Arc<RwLock<AppState>>` and is only written from the
//! dispatching thread; tasks never touch it and report through
//! [`AppEvent`]s instead.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront::app::{App, Route};
//! use storefront::services::api::ApiClient;
//! use storefront::services::storage::MemoryStore;
//! use storefront::ui::action::Action;
//!
//! # async fn run() {
//! let store = Arc::new(MemoryStore::new());
//! let api = Arc::new(ApiClient::with_base_url("http://localhost:8000/api", store.clone()));
//! let mut app = App::new(api, store);
//! app.restore_session();
//!
//! app.dispatch(Action::Navigate(Route::Products));
//! app.settle().await;
//! println!("{}", storefront::ui::render::to_text(&app.render()));
//! # }
//! ```

pub mod cart;
pub mod events;
pub mod query;
pub mod state;
pub mod tasks;

mod event_handler;
pub(crate) mod handlers;

pub use cart::{Cart, CartError, CartItem};
pub use events::AppEvent;
pub use handlers::products::visible_products;
pub use query::{QueryCache, QueryData, QueryKey, QueryState, Resource};
pub use state::*;

use async_channel::{unbounded, Receiver};
use parking_lot::RwLock;
use shared::PaymentMethod;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::core::service::StorefrontApi;
use crate::services::api::ApiClient;
use crate::services::storage::{FileStore, KeyValueStore, TOKEN_KEY};
use crate::ui::action::Action;
use crate::ui::node::Node;
use crate::utils::persisted::Persisted;
use crate::utils::shortcuts::{KeyPress, Shortcut, ShortcutMap};
use crate::utils::throttle::Throttled;
use event_handler::AppEventHandler;
use tasks::TaskSpawner;

/// Storage key of the remembered checkout payment method
pub const PAYMENT_METHOD_KEY: &str = "payment_method";

/// Minimum spacing between manual refreshes
pub const REFRESH_THROTTLE: Duration = Duration::from_secs(2);

/// Main application orchestrator.
pub struct App {
    /// Shared application state. Hold locks briefly.
    pub state: Arc<RwLock<AppState>>,

    /// Results of background tasks, drained by [`App::on_tick`].
    pub event_rx: Receiver<AppEvent>,

    tasks: TaskSpawner,
    api: Arc<dyn StorefrontApi>,
    storage: Arc<dyn KeyValueStore>,
    shortcuts: ShortcutMap<Action>,
    refresh: Throttled<()>,
    payment_method: Persisted<PaymentMethod>,
}

fn default_shortcuts() -> ShortcutMap<Action> {
    ShortcutMap::new(vec![
        Shortcut::new("p", Action::Navigate(Route::Products)).alt(),
        Shortcut::new("c", Action::Navigate(Route::Cart)).alt(),
        Shortcut::new("t", Action::Navigate(Route::Transactions)).alt(),
        Shortcut::new("a", Action::Navigate(Route::Admin)).alt(),
        Shortcut::new("r", Action::Refresh).ctrl(),
        Shortcut::new("Escape", Action::CloseNotification),
    ])
}

impl App {
    /// Create the app over an API implementation and a key-value store.
    ///
    /// Starts logged out on the login page; call [`App::restore_session`]
    /// to pick up a stored token.
    pub fn new(api: Arc<dyn StorefrontApi>, storage: Arc<dyn KeyValueStore>) -> Self {
        let (event_tx, event_rx) = unbounded();
        let payment_method =
            Persisted::load(storage.clone(), PAYMENT_METHOD_KEY, PaymentMethod::default());

        let mut state = AppState::new();
        state.cart_view.payment_method = *payment_method.get();

        tracing::info!("App state initialized");
        Self {
            state: Arc::new(RwLock::new(state)),
            event_rx,
            tasks: TaskSpawner::new(event_tx),
            api,
            storage,
            shortcuts: default_shortcuts(),
            refresh: Throttled::new((), REFRESH_THROTTLE),
            payment_method,
        }
    }

    /// Build the production app: file-backed storage under the data
    /// directory and the HTTP client.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(config.storage_path())?);
        let api = Arc::new(ApiClient::new(config, storage.clone()));
        Ok(Self::new(api, storage))
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.storage
    }

    /// Tasks still running (or whose result has not been handled yet)
    pub fn pending_tasks(&self) -> usize {
        self.tasks.pending()
    }

    /// Resume a stored session. The token is trusted optimistically until
    /// the current-user lookup confirms or rejects it.
    pub fn restore_session(&mut self) {
        if self.storage.get(TOKEN_KEY).is_none() {
            tracing::info!("No stored session");
            let mut state = self.state.write();
            state.route = state.resolve_route(state.route);
            return;
        }

        {
            let mut state = self.state.write();
            state.session = AuthSession::Unverified;
            state.route = state.resolve_route(Route::Products);
        }
        tracing::info!("Stored token found, verifying session");
        handlers::auth::verify_session(self.api.clone(), &self.tasks);
        self.sync_queries();
    }

    /// Apply a user action.
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = ?action, "Dispatching action");
        if action.touches_cart() && self.state.read().cart_view.in_progress {
            tracing::info!(action = ?action, "Ignored while checkout is running");
            return;
        }

        let state = self.state.clone();
        match action {
            Action::Navigate(route) => {
                handlers::navigation::handle_navigate(state, route);
            }
            Action::Logout => handlers::auth::handle_logout(state, self.storage.as_ref()),
            Action::CloseNotification => state.write().notification.close(),
            Action::Resize { width, height } => state.write().viewport.resize(width, height),

            Action::FormInput { form, field, value } => {
                handlers::auth::handle_form_input(state, form, &field, value)
            }
            Action::FormBlur { form, field } => handlers::auth::handle_form_blur(state, form, &field),
            Action::SubmitLogin => {
                handlers::auth::handle_login_submit(state, self.api.clone(), &self.tasks)
            }
            Action::SubmitSignup => {
                handlers::auth::handle_signup_submit(state, self.api.clone(), &self.tasks)
            }

            Action::ChangeQuantity { product_id, delta } => {
                handlers::products::handle_change_quantity(state, product_id, delta)
            }
            Action::AddToCart { product_id } => {
                handlers::products::handle_add_to_cart(state, product_id)
            }
            Action::SearchProducts(term) => {
                handlers::products::handle_search_input(state, term, Instant::now())
            }
            Action::SortProducts(field) => handlers::products::handle_sort(state, field),
            Action::ResetProductSort => handlers::products::handle_reset_sort(state),
            Action::ProductsPage(page) => handlers::products::handle_page(state, page),
            Action::Refresh => self.refresh(Instant::now()),

            Action::IncrementItem(id) => handlers::cart::handle_step_quantity(state, id, true),
            Action::DecrementItem(id) => handlers::cart::handle_step_quantity(state, id, false),
            Action::SetItemQuantity {
                product_id,
                quantity,
            } => handlers::cart::handle_set_quantity(state, product_id, quantity),
            Action::RemoveItem(id) => handlers::cart::handle_remove(state, id),
            Action::OpenCheckout => handlers::cart::handle_open_checkout(state),
            Action::CloseCheckout => handlers::cart::handle_close_checkout(state),
            Action::SelectPaymentMethod(method) => {
                handlers::cart::handle_select_payment(state, method);
                if let Err(e) = self.payment_method.set(method) {
                    tracing::warn!(error = %e, "Failed to remember payment method");
                }
            }
            Action::ConfirmCheckout => {
                handlers::cart::handle_confirm_checkout(state, self.api.clone(), &self.tasks)
            }

            Action::TransactionsPage(page) => handlers::transactions::handle_page(state, page),
            Action::EditTransaction(id) => handlers::transactions::handle_edit(state, id),
            Action::EditQuantityInput(value) => {
                handlers::transactions::handle_edit_input(state, value)
            }
            Action::SaveTransactionEdit => {
                handlers::transactions::handle_save_edit(state, self.api.clone(), &self.tasks)
            }
            Action::CancelTransactionEdit => handlers::transactions::handle_cancel_edit(state),
            Action::DeleteTransaction(id) => {
                handlers::transactions::handle_request_delete(state, id)
            }
            Action::ConfirmDeleteTransaction => {
                handlers::transactions::handle_confirm_delete(state, self.api.clone(), &self.tasks)
            }
            Action::CancelDeleteTransaction => handlers::transactions::handle_cancel_delete(state),
            Action::FilterTransactions { field, value } => {
                handlers::transactions::handle_filter(state, field, value)
            }
            Action::ClearTransactionFilters => handlers::transactions::handle_clear_filters(state),

            Action::AdminTab(tab) => handlers::admin::handle_tab(state, tab),
            Action::OpenAddProduct => handlers::admin::handle_open_add(state),
            Action::CloseAddProduct => handlers::admin::handle_close_add(state),
            Action::NewProductInput { field, value } => {
                handlers::admin::handle_input(state, field, value)
            }
            Action::SubmitNewProduct => {
                handlers::admin::handle_submit(state, self.api.clone(), &self.tasks)
            }
            Action::DeleteProduct(id) => {
                handlers::admin::handle_delete(state, self.api.clone(), &self.tasks, id)
            }
        }

        self.sync_queries();
    }

    /// Change route through the guards; returns the route actually shown.
    pub fn navigate(&mut self, route: Route) -> Route {
        let shown = handlers::navigation::handle_navigate(self.state.clone(), route);
        self.sync_queries();
        shown
    }

    /// Run the action bound to a key press, if any. Returns true when a
    /// shortcut matched.
    pub fn handle_key(&mut self, press: &KeyPress) -> bool {
        let action = self.shortcuts.matching(press).first().map(|a| (*a).clone());
        match action {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Mark everything the current route shows as stale and refetch it.
    /// Throttled to one refresh per [`REFRESH_THROTTLE`].
    pub fn refresh(&mut self, now: Instant) {
        if self.refresh.set((), now).is_none() {
            tracing::debug!("Refresh throttled");
            return;
        }
        {
            let mut state = self.state.write();
            for key in handlers::navigation::active_queries(&state) {
                state.queries.invalidate(key.resource());
            }
        }
        self.sync_queries();
    }

    /// Called regularly from the driving loop: applies finished task
    /// results, the debounced product search and any fetches they unlock.
    pub fn on_tick(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
        handlers::products::poll_search(&self.state, Instant::now());
        self.sync_queries();
    }

    /// Wait until every spawned task has reported back, applying results
    /// as they arrive (including fetches they trigger).
    pub async fn settle(&mut self) {
        while self.tasks.pending() > 0 {
            match self.event_rx.recv().await {
                Ok(event) => {
                    self.handle_event(event);
                    self.sync_queries();
                }
                Err(_) => break,
            }
        }
    }

    /// Handle async event results
    pub fn handle_event(&mut self, event: AppEvent) {
        self.handle_event_impl(event);
    }

    /// Forced logout after a 401: the token is gone and every piece of
    /// in-memory state (cart, cache, dialogs) is discarded.
    pub(crate) fn hard_logout(&mut self) {
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(error = %e, "Failed to remove stored token");
        }
        let mut state = AppState::new();
        state.cart_view.payment_method = *self.payment_method.get();
        *self.state.write() = state;
        tracing::warn!("Session ended by the server, redirected to {}", Route::Login.path());
    }

    fn sync_queries(&self) {
        handlers::navigation::sync_queries(self.state.clone(), self.api.clone(), &self.tasks);
    }

    /// Render the current screen
    pub fn render(&self) -> Node {
        crate::ui::view(&self.state.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::tests::{test_app, MockApi};
    use crate::services::storage::MemoryStore;

    #[tokio::test]
    async fn test_restore_session_verifies_token() {
        let (mut app, _) = test_app(MockApi::new(), Some("token-alice"));
        {
            let state = app.state.read();
            assert_eq!(state.session, AuthSession::Unverified);
            assert_eq!(state.route, Route::Products);
        }
        app.settle().await;

        let state = app.state.read();
        assert_eq!(state.session.user().map(|u| u.username.as_str()), Some("alice"));
        assert!(state.queries.products(1).is_some());
        assert_eq!(state.products.pagination.total(), 3);
    }

    #[tokio::test]
    async fn test_unauthorized_forces_hard_logout() {
        let store = Arc::new(MemoryStore::with_entry(TOKEN_KEY, "expired"));
        let api = MockApi::new().unauthorized(store.clone());
        let mut app = App::new(Arc::new(api), store.clone());
        {
            let mut state = app.state.write();
            state.session = AuthSession::Unverified;
            state.route = Route::Cart;
            state
                .cart
                .add(crate::app::cart::tests::product(1, 100, 5), 2)
                .unwrap();
            state.cart_view.checkout_dialog.open();
        }

        app.dispatch(Action::ConfirmCheckout);
        app.settle().await;

        assert_eq!(store.get(TOKEN_KEY), None);
        let state = app.state.read();
        assert_eq!(state.route, Route::Login);
        assert_eq!(state.session, AuthSession::LoggedOut);
        assert!(state.cart.is_empty());
        assert!(!state.cart_view.checkout_dialog.is_open());
    }

    #[tokio::test]
    async fn test_results_after_logout_are_dropped() {
        let (mut app, _) = test_app(MockApi::new(), Some("token-alice"));
        app.dispatch(Action::Logout);
        app.settle().await;

        let state = app.state.read();
        assert_eq!(state.route, Route::Login);
        assert!(state.queries.products(1).is_none());
    }

    #[tokio::test]
    async fn test_checkout_lock_released_when_verification_fails() {
        let api = MockApi::new()
            .without_current_user()
            .fail_purchase_at(1, "Not enough stock available");
        let (mut app, _) = test_app(api, Some("token-alice"));
        {
            let mut state = app.state.write();
            state.route = Route::Cart;
            state
                .cart
                .add(crate::app::cart::tests::product(1, 100, 5), 1)
                .unwrap();
            state.cart_view.checkout_dialog.open();
        }

        app.dispatch(Action::ConfirmCheckout);
        app.settle().await;

        {
            let state = app.state.read();
            assert_eq!(state.session, AuthSession::LoggedOut);
            assert!(!state.cart_view.in_progress);
            assert!(!state.loading.visible);
        }

        app.state.write().session = AuthSession::Unverified;
        app.dispatch(Action::RemoveItem(1));
        assert!(app.state.read().cart.is_empty());
    }

    #[tokio::test]
    async fn test_mutation_in_flight_at_logout_does_not_block_next_session() {
        let api = MockApi::new().staff();
        let calls = api.call_log();
        let (mut app, store) = test_app(api, Some("token-admin"));
        app.settle().await;

        app.dispatch(Action::DeleteProduct(1));
        app.dispatch(Action::Logout);
        app.settle().await;
        assert!(!app.state.read().admin.delete_call.is_loading());
        assert!(!app.state.read().loading.visible);

        store.set(TOKEN_KEY, "token-admin").unwrap();
        app.restore_session();
        app.settle().await;
        assert!(app.state.read().is_admin());

        app.dispatch(Action::DeleteProduct(2));
        app.settle().await;
        assert!(calls.lock().iter().any(|c| c == "delete_product(2)"));
        assert!(!app.state.read().admin.delete_call.is_loading());
    }

    #[tokio::test]
    async fn test_payment_method_is_remembered() {
        let store = Arc::new(MemoryStore::new());
        let mut app = App::new(Arc::new(MockApi::new()), store.clone());
        app.dispatch(Action::SelectPaymentMethod(PaymentMethod::Cash));

        let app = App::new(Arc::new(MockApi::new()), store);
        assert_eq!(app.state.read().cart_view.payment_method, PaymentMethod::Cash);
    }

    #[tokio::test]
    async fn test_shortcuts_navigate() {
        let (mut app, _) = test_app(MockApi::new(), Some("token-alice"));
        app.settle().await;

        assert!(app.handle_key(&"alt+c".parse().unwrap()));
        assert_eq!(app.state.read().route, Route::Cart);
        assert!(!app.handle_key(&"x".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_refresh_is_throttled() {
        let api = MockApi::new();
        let calls = api.call_log();
        let (mut app, _) = test_app(api, Some("token-alice"));
        app.settle().await;

        let now = Instant::now();
        app.refresh(now);
        app.settle().await;
        app.refresh(now + Duration::from_millis(500));
        app.settle().await;

        let fetches = calls.lock().iter().filter(|c| *c == "get_products(1)").count();
        assert_eq!(fetches, 2);
    }

    #[tokio::test]
    async fn test_handle_event_without_spawned_task() {
        let (mut app, _) = test_app(MockApi::new(), None);
        app.handle_event(AppEvent::LoginResult(Err(crate::services::api::ApiError::request(
            "Login failed",
            None,
        ))));
        assert_eq!(app.pending_tasks(), 0);
        assert_eq!(app.state.read().login_error.as_deref(), Some("Login failed"));
    }
}
