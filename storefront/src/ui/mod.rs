//! # UI Layer
//!
//! Builds the current screen as a [`node::Node`] tree. Nothing here draws
//! pixels or reads input: a front end renders the tree (see
//! [`render::to_text`]) and sends [`action::Action`]s back to the app.
//!
//! Guarded screens are wrapped with the navigation bar; the loading overlay
//! and the toast sit on top of every screen.

pub mod action;
pub mod node;
pub mod render;
pub mod screens;
pub mod widgets;

use crate::app::state::{AppState, Route};
use node::Node;
use widgets::nav_bar::nav_bar;
use widgets::notifications::{loading_overlay, toast};

/// Render tree for the route the state is on
pub fn view(state: &AppState) -> Node {
    let screen = match state.route {
        Route::Login => screens::auth::login_view(state),
        Route::Signup => screens::auth::signup_view(state),
        Route::Products => screens::products::view(state),
        Route::Cart => screens::cart::view(state),
        Route::Transactions => screens::transactions::view(state),
        Route::Admin => screens::admin::view(state),
    };

    let mut nodes = Vec::with_capacity(4);
    if state.route.requires_auth() && state.is_authenticated() {
        nodes.push(nav_bar(state));
    }
    nodes.push(screen);
    nodes.push(loading_overlay(&state.loading));
    nodes.push(toast(&state.notification));
    Node::Column(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{AuthSession, Severity};
    use crate::ui::action::Action;
    use shared::User;

    #[test]
    fn test_login_has_no_nav_bar() {
        let node = view(&AppState::new());
        assert!(node.find_button("Logout").is_none());
        assert!(node.contains_text("Login"));
    }

    #[test]
    fn test_admin_link_only_for_staff() {
        let mut state = AppState::new();
        state.route = Route::Cart;
        state.session = AuthSession::Unverified;
        assert!(view(&state).find_button("Admin").is_none());

        state.session = AuthSession::Authenticated {
            user: User {
                id: 1,
                username: "root".to_string(),
                email: String::new(),
                is_staff: true,
            },
        };
        let node = view(&state);
        assert!(node.find_button("Admin").is_some());
        assert!(node.find_button("Logout").is_some());
    }

    #[test]
    fn test_toast_sits_on_every_screen() {
        let mut state = AppState::new();
        state.notification.show("Session saved", Severity::Info);
        let node = view(&state);
        assert!(node.contains_text("Session saved"));
        assert!(node
            .actions()
            .iter()
            .any(|(_, action)| **action == Action::CloseNotification));
    }
}
