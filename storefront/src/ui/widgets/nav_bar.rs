//! # Navigation Bar
//!
//! Links for signed-in users; Admin only shows for staff.

use crate::app::state::{AppState, Route};
use crate::ui::action::Action;
use crate::ui::node::Node;

pub fn nav_bar(state: &AppState) -> Node {
    let link = |route: Route, label: String| Node::button_if(label, Action::Navigate(route), state.route != route);

    let mut nodes = vec![
        Node::text("Storefront"),
        link(Route::Products, "Products".to_string()),
        link(Route::Cart, format!("Cart ({})", state.cart.item_count())),
        link(Route::Transactions, "Transactions".to_string()),
    ];
    if state.is_admin() {
        nodes.push(link(Route::Admin, "Admin".to_string()));
    }
    if let Some(user) = state.session.user() {
        nodes.push(Node::text(user.username.clone()));
    }
    nodes.push(Node::button("Logout", Action::Logout));
    Node::Row(nodes)
}
