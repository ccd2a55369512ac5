//! # Cart Screen
//!
//! Cart lines with quantity steppers and the checkout dialog.

use shared::{format_price, PaymentMethod};

use crate::app::state::{AppState, Route};
use crate::ui::action::Action;
use crate::ui::node::{Node, Tone};
use crate::ui::widgets::tables::{empty_state, table};

fn checkout_dialog(state: &AppState) -> Node {
    let view = &state.cart_view;
    let selected = PaymentMethod::all()
        .iter()
        .position(|m| *m == view.payment_method)
        .unwrap_or(0);

    let mut body = vec![
        Node::Choice {
            label: "Payment Method".to_string(),
            options: PaymentMethod::all()
                .iter()
                .map(|m| Node::button_if(m.label(), Action::SelectPaymentMethod(*m), !view.in_progress))
                .collect(),
            selected,
        },
        Node::text(format!("Total: {}", format_price(state.cart.total()))),
    ];
    if view.in_progress {
        body.push(Node::Spinner(format!(
            "Purchased {} of {} items...",
            view.completed_lines,
            state.cart.items().len()
        )));
    }
    if let Some(error) = &view.error {
        body.push(Node::alert(Tone::Error, error.clone()));
    }
    body.push(Node::Row(vec![
        Node::button_if("Cancel", Action::CloseCheckout, !view.in_progress),
        Node::button_if("Complete Purchase", Action::ConfirmCheckout, !view.in_progress),
    ]));
    Node::dialog("Checkout", body)
}

pub fn view(state: &AppState) -> Node {
    if state.cart.is_empty() {
        return Node::Column(vec![
            Node::heading("Shopping Cart"),
            empty_state("Your cart is empty", Some("Browse products to add items")),
            Node::button("Continue Shopping", Action::Navigate(Route::Products)),
        ]);
    }

    let rows = state
        .cart
        .items()
        .iter()
        .map(|item| {
            let id = item.product.id;
            vec![
                Node::text(item.product.name.clone()),
                Node::text(format_price(item.product.price)),
                Node::Row(vec![
                    Node::button_if("-", Action::DecrementItem(id), item.can_decrement()),
                    Node::text(item.quantity.to_string()),
                    Node::button_if("+", Action::IncrementItem(id), item.can_increment()),
                ]),
                Node::text(format_price(item.subtotal())),
                Node::button("Remove", Action::RemoveItem(id)),
            ]
        })
        .collect();

    let mut nodes = vec![
        Node::heading("Shopping Cart"),
        table(&["Product", "Price", "Quantity", "Subtotal", ""], rows),
        Node::subheading(format!("Total: {}", format_price(state.cart.total()))),
        Node::Row(vec![
            Node::button("Continue Shopping", Action::Navigate(Route::Products)),
            Node::button("Proceed to Checkout", Action::OpenCheckout),
        ]),
    ];
    if state.cart_view.checkout_dialog.is_open() {
        nodes.push(checkout_dialog(state));
    }
    Node::Column(nodes)
}
