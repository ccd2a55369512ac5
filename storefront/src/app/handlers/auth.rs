//! # Authentication Handlers
//!
//! Login, signup and logout, plus the form edits that lead up to them.

use parking_lot::RwLock;
use shared::{LoginRequest, SignupRequest};
use std::sync::Arc;

use crate::app::events::AppEvent;
use crate::app::state::{AppState, AuthSession, Route};
use crate::app::tasks::TaskSpawner;
use crate::core::service::StorefrontApi;
use crate::services::storage::{KeyValueStore, TOKEN_KEY};
use crate::ui::action::AuthForm;

/// Handle a keystroke in the login or signup form
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_form_input(
    state: Arc<RwLock<AppState>>,
    form: AuthForm,
    field: &str,
    value: String,
) {
    let mut state = state.write();
    match form {
        AuthForm::Login => {
            state.login_form.change(field, value);
            state.login_error = None;
        }
        AuthForm::Signup => {
            state.signup_form.change(field, value);
            state.signup_error = None;
        }
    }
}

pub(crate) fn handle_form_blur(state: Arc<RwLock<AppState>>, form: AuthForm, field: &str) {
    let mut state = state.write();
    match form {
        AuthForm::Login => state.login_form.blur(field),
        AuthForm::Signup => state.signup_form.blur(field),
    }
}

/// Handle login submit
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_login_submit(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn StorefrontApi>,
    tasks: &TaskSpawner,
) {
    let request = {
        let mut state = state.write();
        if state.login_form.is_submitting() {
            return;
        }
        state.login_error = None;
        let request = state.login_form.submit(|values| LoginRequest {
            username: values.get("username").cloned().unwrap_or_default(),
            password: values.get("password").cloned().unwrap_or_default(),
        });
        if request.is_some() {
            state.loading.show(Some("Logging in..."));
        }
        request
    };

    let Some(request) = request else {
        tracing::debug!("Login form invalid, not submitting");
        return;
    };

    tasks.spawn("login", async move { AppEvent::LoginResult(api.login(request).await) });
}

/// Handle signup submit
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_signup_submit(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn StorefrontApi>,
    tasks: &TaskSpawner,
) {
    let request = {
        let mut state = state.write();
        if state.signup_form.is_submitting() {
            return;
        }
        state.signup_error = None;
        let request = state.signup_form.submit(|values| SignupRequest {
            username: values.get("username").cloned().unwrap_or_default(),
            email: values.get("email").cloned().unwrap_or_default(),
            password: values.get("password").cloned().unwrap_or_default(),
        });
        if request.is_some() {
            state.loading.show(Some("Creating account..."));
        }
        request
    };

    let Some(request) = request else {
        tracing::debug!("Signup form invalid, not submitting");
        return;
    };

    tasks.spawn("signup", async move { AppEvent::SignupResult(api.signup(request).await) });
}

/// Ask the API who owns the stored token
pub(crate) fn verify_session(api: Arc<dyn StorefrontApi>, tasks: &TaskSpawner) {
    tasks.spawn("current_user", async move {
        AppEvent::CurrentUserResult(api.get_current_user().await)
    });
}

/// Store a fresh token and start verifying it.
///
/// Returns false (session untouched) when the token cannot be stored.
pub(crate) fn begin_session(
    state: Arc<RwLock<AppState>>,
    storage: &dyn KeyValueStore,
    api: Arc<dyn StorefrontApi>,
    tasks: &TaskSpawner,
    token: &str,
) -> bool {
    if let Err(e) = storage.set(TOKEN_KEY, token) {
        tracing::error!(error = %e, "Failed to store token");
        let mut state = state.write();
        state.notification.error(format!("Could not save session: {}", e));
        return false;
    }

    {
        let mut state = state.write();
        state.session = AuthSession::Unverified;
        state.route = state.resolve_route(Route::Products);
        tracing::info!("Session started, verifying user");
    }
    verify_session(api, tasks);
    true
}

/// Handle logout: forget the token and return to the login page. The cart
/// survives; cached server data does not.
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_logout(state: Arc<RwLock<AppState>>, storage: &dyn KeyValueStore) {
    if let Err(e) = storage.remove(TOKEN_KEY) {
        tracing::warn!(error = %e, "Failed to remove stored token");
    }

    let mut state = state.write();
    state.session = AuthSession::LoggedOut;
    state.queries.clear();
    state.login_form.reset();
    state.signup_form.reset();
    state.route = Route::Login;
    tracing::info!("Logged out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::tests::{test_app, MockApi};
    use crate::ui::action::Action;

    fn fill_login(app: &mut crate::app::App, username: &str, password: &str) {
        for (field, value) in [("username", username), ("password", password)] {
            app.dispatch(Action::FormInput {
                form: AuthForm::Login,
                field: field.to_string(),
                value: value.to_string(),
            });
        }
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials_authenticates() {
        let (mut app, store) = test_app(MockApi::new(), None);
        fill_login(&mut app, "alice", "secret123");

        app.dispatch(Action::SubmitLogin);
        assert!(app.state.read().loading.visible);
        app.settle().await;

        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("token-alice"));
        let state = app.state.read();
        assert!(matches!(state.session, AuthSession::Authenticated { .. }));
        assert_eq!(state.route, Route::Products);
        assert!(!state.loading.visible);
    }

    #[tokio::test]
    async fn test_login_with_invalid_credentials_stays_logged_out() {
        let (mut app, store) = test_app(MockApi::new(), None);
        fill_login(&mut app, "alice", "wrong");

        app.dispatch(Action::SubmitLogin);
        app.settle().await;

        assert_eq!(store.get(TOKEN_KEY), None);
        let state = app.state.read();
        assert_eq!(state.session, AuthSession::LoggedOut);
        assert_eq!(state.route, Route::Login);
        assert_eq!(
            state.login_error.as_deref(),
            Some("Unable to log in with provided credentials.")
        );
        assert!(!state.login_form.is_submitting());
    }

    #[tokio::test]
    async fn test_empty_login_form_is_not_sent() {
        let api = MockApi::new();
        let calls = api.call_log();
        let (mut app, _) = test_app(api, None);

        app.dispatch(Action::SubmitLogin);
        app.settle().await;

        assert!(calls.lock().is_empty());
        let state = app.state.read();
        assert_eq!(state.login_form.error("username"), Some("Username is required"));
        assert!(!state.loading.visible);
    }

    #[tokio::test]
    async fn test_failed_user_lookup_clears_token() {
        let (mut app, store) = test_app(MockApi::new().without_current_user(), None);
        fill_login(&mut app, "alice", "secret123");

        app.dispatch(Action::SubmitLogin);
        app.settle().await;

        assert_eq!(store.get(TOKEN_KEY), None);
        let state = app.state.read();
        assert_eq!(state.session, AuthSession::LoggedOut);
        assert_eq!(state.route, Route::Login);
    }

    #[tokio::test]
    async fn test_signup_logs_in_with_returned_token() {
        let (mut app, store) = test_app(MockApi::new(), None);
        app.dispatch(Action::Navigate(Route::Signup));
        for (field, value) in [
            ("username", "bob"),
            ("email", "bob@example.com"),
            ("password", "longenough"),
        ] {
            app.dispatch(Action::FormInput {
                form: AuthForm::Signup,
                field: field.to_string(),
                value: value.to_string(),
            });
        }

        app.dispatch(Action::SubmitSignup);
        app.settle().await;

        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("token-bob"));
        assert!(app.state.read().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_keeps_cart_and_drops_token() {
        let (mut app, store) = test_app(MockApi::new(), Some("token-alice"));
        app.settle().await;
        app.dispatch(Action::AddToCart { product_id: 1 });
        assert_eq!(app.state.read().cart.item_count(), 1);

        app.dispatch(Action::Logout);

        assert_eq!(store.get(TOKEN_KEY), None);
        let state = app.state.read();
        assert_eq!(state.route, Route::Login);
        assert!(!state.is_authenticated());
        assert_eq!(state.cart.item_count(), 1);
    }
}
