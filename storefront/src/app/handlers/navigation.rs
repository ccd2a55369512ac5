//! # Navigation Handlers
//!
//! Route changes behind the auth guards, and fetching whatever the shown
//! route reads from the query cache.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::app::query::QueryKey;
use crate::app::state::{AppState, Route};
use crate::app::tasks::queries::fetch_query;
use crate::app::tasks::TaskSpawner;
use crate::core::service::StorefrontApi;

/// Handle route change with authentication guard
///
/// Internal handler function - use [`crate::app::App::navigate`] instead.
pub(crate) fn handle_navigate(state: Arc<RwLock<AppState>>, requested: Route) -> Route {
    let mut state = state.write();
    let route = state.resolve_route(requested);
    if route != requested {
        tracing::info!(
            requested = requested.path(),
            redirect = route.path(),
            "Access denied, redirecting"
        );
    }
    state.route = route;
    route
}

/// Cache keys the current route renders
pub(crate) fn active_queries(state: &AppState) -> Vec<QueryKey> {
    if !state.is_authenticated() {
        return Vec::new();
    }
    match state.route {
        Route::Products => vec![QueryKey::Products {
            page: state.products.pagination.page(),
        }],
        Route::Transactions => vec![QueryKey::Transactions {
            page: state.transactions.pagination.page(),
        }],
        Route::Admin => vec![QueryKey::Products { page: 1 }, QueryKey::Users],
        Route::Cart | Route::Login | Route::Signup => Vec::new(),
    }
}

/// Start a fetch for every active key that is missing or stale and not
/// already in flight.
pub(crate) fn sync_queries(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn StorefrontApi>,
    tasks: &TaskSpawner,
) {
    let keys: Vec<QueryKey> = {
        let mut state = state.write();
        let mut keys = active_queries(&state);
        keys.retain(|key| state.queries.should_fetch(*key) && state.queries.begin_fetch(*key));
        keys
    };

    for key in keys {
        fetch_query(tasks, api.clone(), key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::tests::{test_app, MockApi};
    use crate::app::state::AuthSession;
    use crate::ui::action::Action;

    #[tokio::test]
    async fn test_guarded_routes_redirect_to_login() {
        let (mut app, _) = test_app(MockApi::new(), None);
        for route in [Route::Products, Route::Cart, Route::Transactions, Route::Admin] {
            app.dispatch(Action::Navigate(route));
            assert_eq!(app.state.read().route, Route::Login);
        }
        app.dispatch(Action::Navigate(Route::Signup));
        assert_eq!(app.state.read().route, Route::Signup);
    }

    #[tokio::test]
    async fn test_admin_route_needs_staff() {
        let (mut app, _) = test_app(MockApi::new(), Some("token-alice"));
        app.settle().await;
        app.dispatch(Action::Navigate(Route::Admin));
        assert_eq!(app.state.read().route, Route::Products);

        let (mut app, _) = test_app(MockApi::new().staff(), Some("token-admin"));
        app.settle().await;
        assert!(app.state.read().is_admin());
        app.dispatch(Action::Navigate(Route::Admin));
        app.settle().await;
        let state = app.state.read();
        assert_eq!(state.route, Route::Admin);
        assert!(state.queries.users().is_some());
    }

    #[test]
    fn test_active_queries_follow_route_and_page() {
        let mut state = AppState::new();
        assert!(active_queries(&state).is_empty());

        state.session = AuthSession::Unverified;
        state.route = Route::Transactions;
        assert_eq!(active_queries(&state), vec![QueryKey::Transactions { page: 1 }]);

        state.route = Route::Cart;
        assert!(active_queries(&state).is_empty());
    }

    #[tokio::test]
    async fn test_visiting_a_page_fetches_it_once() {
        let api = MockApi::new();
        let calls = api.call_log();
        let (mut app, _) = test_app(api, Some("token-alice"));
        app.settle().await;

        app.dispatch(Action::Navigate(Route::Cart));
        app.dispatch(Action::Navigate(Route::Products));
        app.settle().await;

        let fetches = calls.lock().iter().filter(|c| *c == "get_products(1)").count();
        assert_eq!(fetches, 1);
    }
}
