//! # Products Screen
//!
//! Current page of the catalogue as a grid of cards. Search and sort work
//! on the loaded page; paging goes back to the server.

use shared::{format_price, Product};

use crate::app::query::QueryKey;
use crate::app::state::{AppState, Route};
use crate::app::visible_products;
use crate::ui::action::Action;
use crate::ui::node::{Node, Tone};
use crate::ui::widgets::forms::input;
use crate::ui::widgets::pagination::page_controls;
use crate::ui::widgets::tables::empty_state;
use crate::utils::record::ProductField;

const SORT_FIELDS: &[(ProductField, &str)] = &[
    (ProductField::Name, "Name"),
    (ProductField::Price, "Price"),
    (ProductField::Quantity, "Stock"),
];

fn sort_bar(state: &AppState) -> Node {
    let sort = &state.products.sort;
    let mut nodes = vec![Node::text("Sort by:")];
    for (field, label) in SORT_FIELDS {
        let label = if sort.field() == Some(*field) {
            format!("{} {}", label, sort.direction().arrow())
        } else {
            label.to_string()
        };
        nodes.push(Node::button(label, Action::SortProducts(*field)));
    }
    if sort.field().is_some() {
        nodes.push(Node::button("Clear", Action::ResetProductSort));
    }
    Node::Row(nodes)
}

fn product_card(state: &AppState, product: &Product) -> Node {
    let picked = state.products.quantity(product.id);
    let stock = product.stock();

    let mut nodes = vec![
        Node::subheading(product.name.clone()),
        Node::text(format_price(product.price)),
    ];
    if product.in_stock() {
        nodes.push(Node::text(format!("In stock: {}", stock)));
    } else {
        nodes.push(Node::Chip {
            tone: Tone::Error,
            label: "Out of stock".to_string(),
        });
    }
    if let Some(image) = product.display_image() {
        nodes.push(Node::text(format!("Image: {}", image)));
    }
    nodes.push(Node::Row(vec![
        Node::button_if(
            "-",
            Action::ChangeQuantity {
                product_id: product.id,
                delta: -1,
            },
            picked > 1,
        ),
        Node::text(picked.to_string()),
        Node::button_if(
            "+",
            Action::ChangeQuantity {
                product_id: product.id,
                delta: 1,
            },
            picked < stock,
        ),
        Node::button_if(
            "Add to Cart",
            Action::AddToCart {
                product_id: product.id,
            },
            product.in_stock(),
        ),
    ]));
    Node::Column(nodes)
}

pub fn view(state: &AppState) -> Node {
    let mut nodes = vec![
        Node::heading("Available Products"),
        Node::Row(vec![
            input(
                "search",
                "Search",
                state.products.search_input.latest(),
                None,
            ),
            Node::Badge {
                label: "View Cart".to_string(),
                count: state.cart.item_count(),
            },
            Node::button("View Cart", Action::Navigate(Route::Cart)),
        ]),
        sort_bar(state),
    ];

    let key = QueryKey::Products {
        page: state.products.pagination.page(),
    };
    let query = state.queries.state(key);
    let Some(products) = visible_products(state) else {
        match query.and_then(|q| q.error()) {
            Some(error) => nodes.push(Node::alert(
                Tone::Error,
                format!("Error loading products: {}", error),
            )),
            None => nodes.push(Node::Spinner("Loading products...".to_string())),
        }
        return Node::Column(nodes);
    };

    if let Some(error) = query.and_then(|q| q.error()) {
        nodes.push(Node::alert(
            Tone::Warning,
            format!("Error loading products: {}", error),
        ));
    }

    if products.is_empty() {
        nodes.push(empty_state("No products found", None));
    } else {
        let columns = state.viewport.grid_columns().max(1);
        for chunk in products.chunks(columns) {
            nodes.push(Node::Row(
                chunk.iter().map(|p| product_card(state, p)).collect(),
            ));
        }
    }

    nodes.push(page_controls(&state.products.pagination, Action::ProductsPage));
    Node::Column(nodes)
}
