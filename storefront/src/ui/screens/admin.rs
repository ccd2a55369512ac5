//! # Admin Screen
//!
//! Staff-only product and user management.

use shared::format_price;

use crate::app::query::QueryKey;
use crate::app::state::{AdminTab, AppState, NewProductField};
use crate::ui::action::Action;
use crate::ui::node::{Node, Tone};
use crate::ui::widgets::forms::input;
use crate::ui::widgets::tables::{empty_state, table};

fn tabs(state: &AppState) -> Node {
    Node::Row(
        [AdminTab::Products, AdminTab::Users]
            .into_iter()
            .map(|tab| Node::button_if(tab.label(), Action::AdminTab(tab), state.admin.tab != tab))
            .collect(),
    )
}

fn query_problem(state: &AppState, key: QueryKey, what: &str) -> Node {
    match state.queries.state(key).and_then(|q| q.error()) {
        Some(error) => Node::alert(Tone::Error, format!("Error loading {}: {}", what, error)),
        None => Node::Spinner(format!("Loading {}...", what)),
    }
}

fn products_tab(state: &AppState) -> Vec<Node> {
    let mut nodes = vec![Node::button("Add Product", Action::OpenAddProduct)];
    match state.queries.products(1) {
        Some(page) if page.results.is_empty() => nodes.push(empty_state("No products yet", None)),
        Some(page) => {
            let busy = state.admin.delete_call.is_loading();
            nodes.push(table(
                &["Name", "Price", "Stock", ""],
                page.results
                    .iter()
                    .map(|p| {
                        vec![
                            Node::text(p.name.clone()),
                            Node::text(format_price(p.price)),
                            Node::text(p.quantity.to_string()),
                            Node::button_if("Delete", Action::DeleteProduct(p.id), !busy),
                        ]
                    })
                    .collect(),
            ));
        }
        None => nodes.push(query_problem(state, QueryKey::Products { page: 1 }, "products")),
    }
    nodes
}

fn users_tab(state: &AppState) -> Vec<Node> {
    match state.queries.users() {
        Some(users) => vec![table(
            &["Username", "Email", "Role"],
            users
                .iter()
                .map(|u| {
                    vec![
                        Node::text(u.username.clone()),
                        Node::text(u.email.clone()),
                        Node::text(u.role_label()),
                    ]
                })
                .collect(),
        )],
        None => vec![query_problem(state, QueryKey::Users, "users")],
    }
}

fn add_product_dialog(state: &AppState) -> Node {
    let form = &state.admin.form;
    let busy = state.admin.add_call.is_loading();
    let image_file = form
        .image_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    Node::dialog(
        "Add New Product",
        vec![
            input("name", "Name", &form.name, None),
            input("price", "Price", &form.price, None),
            input("quantity", "Quantity", &form.quantity, None),
            input("image_url", "Image URL", &form.image_url, None),
            input("image_file", "Image File", &image_file, None),
            Node::Row(vec![
                Node::button_if("Cancel", Action::CloseAddProduct, !busy),
                Node::button_if("Add", Action::SubmitNewProduct, !busy),
            ]),
        ],
    )
}

/// Field names used by the add-product inputs
pub fn new_product_field(name: &str) -> Option<NewProductField> {
    match name {
        "name" => Some(NewProductField::Name),
        "price" => Some(NewProductField::Price),
        "quantity" => Some(NewProductField::Quantity),
        "image_url" => Some(NewProductField::ImageUrl),
        "image_file" => Some(NewProductField::ImageFile),
        _ => None,
    }
}

pub fn view(state: &AppState) -> Node {
    let mut nodes = vec![Node::heading("Admin Dashboard"), tabs(state)];
    match state.admin.tab {
        AdminTab::Products => nodes.extend(products_tab(state)),
        AdminTab::Users => nodes.extend(users_tab(state)),
    }
    if state.admin.add_dialog.is_open() {
        nodes.push(add_product_dialog(state));
    }
    Node::Column(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::query::QueryData;
    use shared::User;

    #[test]
    fn test_users_tab_lists_roles() {
        let mut state = AppState::new();
        state.admin.tab = AdminTab::Users;
        state.queries.begin_fetch(QueryKey::Users);
        state.queries.complete(
            QueryKey::Users,
            Ok(QueryData::Users(vec![User {
                id: 1,
                username: "root".to_string(),
                email: "root@example.com".to_string(),
                is_staff: true,
            }])),
        );

        let text = crate::ui::render::to_text(&view(&state));
        assert!(text.contains("root@example.com"));
        assert!(text.contains("Admin"));
    }

    #[test]
    fn test_dialog_fields_map_back_to_form() {
        for name in ["name", "price", "quantity", "image_url", "image_file"] {
            assert!(new_product_field(name).is_some());
        }
        assert_eq!(new_product_field("colour"), None);
    }
}
