//! # Transactions Screen
//!
//! Purchase history with status chips, a quantity edit dialog and a
//! delete confirmation.

use shared::{format_price, format_timestamp, Transaction, TransactionStatus};

use crate::app::query::QueryKey;
use crate::app::state::AppState;
use crate::ui::action::Action;
use crate::ui::node::{Node, Tone};
use crate::ui::widgets::forms::input;
use crate::ui::widgets::pagination::page_controls;
use crate::ui::widgets::tables::{empty_state, table};
use crate::utils::record::TransactionField;

pub fn status_tone(status: TransactionStatus) -> Tone {
    match status {
        TransactionStatus::Completed => Tone::Success,
        TransactionStatus::Pending => Tone::Warning,
        TransactionStatus::Failed => Tone::Error,
    }
}

fn status_filters(state: &AppState) -> Node {
    let current = state
        .transactions
        .filters
        .filter(TransactionField::Status)
        .unwrap_or("")
        .to_ascii_uppercase();
    let option = |label: &str, value: &str| {
        Node::button_if(
            label,
            Action::FilterTransactions {
                field: TransactionField::Status,
                value: value.to_string(),
            },
            current != value,
        )
    };
    Node::Row(vec![
        Node::text("Status:"),
        option("All", ""),
        option("Completed", TransactionStatus::Completed.as_str()),
        option("Pending", TransactionStatus::Pending.as_str()),
        option("Failed", TransactionStatus::Failed.as_str()),
    ])
}

fn row(transaction: &Transaction) -> Vec<Node> {
    vec![
        Node::text(transaction.product.name.clone()),
        Node::text(transaction.quantity.to_string()),
        Node::text(format_price(transaction.total_amount)),
        Node::text(transaction.payment_method.as_str()),
        Node::text(format_timestamp(&transaction.created_at)),
        Node::Chip {
            tone: status_tone(transaction.status),
            label: transaction.status.as_str().to_string(),
        },
        Node::Row(vec![
            Node::button("Edit", Action::EditTransaction(transaction.id)),
            Node::button("Delete", Action::DeleteTransaction(transaction.id)),
        ]),
    ]
}

fn dialogs(state: &AppState, nodes: &mut Vec<Node>) {
    let view = &state.transactions;
    if let Some(edit) = &view.edit {
        let busy = view.update_call.is_loading();
        nodes.push(Node::dialog(
            "Edit Transaction",
            vec![
                input("quantity", "Quantity", &edit.quantity, edit.error.as_deref()),
                Node::Row(vec![
                    Node::button_if("Cancel", Action::CancelTransactionEdit, !busy),
                    Node::button_if("Save", Action::SaveTransactionEdit, !busy),
                ]),
            ],
        ));
    }
    if view.pending_delete.is_some() {
        nodes.push(Node::dialog(
            "Delete Transaction",
            vec![
                Node::text("Are you sure you want to delete this transaction?"),
                Node::Row(vec![
                    Node::button("Cancel", Action::CancelDeleteTransaction),
                    Node::button("Delete", Action::ConfirmDeleteTransaction),
                ]),
            ],
        ));
    }
}

pub fn view(state: &AppState) -> Node {
    let mut nodes = vec![Node::heading("Transaction History"), status_filters(state)];

    let page = state.transactions.pagination.page();
    let query = state.queries.state(QueryKey::Transactions { page });
    let Some(loaded) = state.queries.transactions(page) else {
        match query.and_then(|q| q.error()) {
            Some(error) => nodes.push(Node::alert(
                Tone::Error,
                format!("Error loading transactions: {}", error),
            )),
            None => nodes.push(Node::Spinner("Loading transactions...".to_string())),
        }
        return Node::Column(nodes);
    };

    let shown = state.transactions.filters.apply(&loaded.results);
    if shown.is_empty() {
        nodes.push(empty_state("No transactions found", None));
    } else {
        nodes.push(table(
            &["Product", "Quantity", "Total", "Payment", "Date", "Status", ""],
            shown.iter().map(row).collect(),
        ));
    }
    nodes.push(page_controls(
        &state.transactions.pagination,
        Action::TransactionsPage,
    ));
    dialogs(state, &mut nodes);
    Node::Column(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::tests::{catalogue, transaction};
    use crate::app::query::QueryData;
    use crate::app::state::EditDialog;
    use shared::Page;

    fn state_with(results: Vec<Transaction>) -> AppState {
        let mut state = AppState::new();
        let key = QueryKey::Transactions { page: 1 };
        state.queries.begin_fetch(key);
        state.queries.complete(
            key,
            Ok(QueryData::Transactions(Page {
                count: results.len() as u64,
                next: None,
                previous: None,
                results,
            })),
        );
        state
    }

    #[test]
    fn test_empty_history() {
        assert!(view(&state_with(Vec::new())).contains_text("No transactions found"));
    }

    #[test]
    fn test_status_chips_are_coloured() {
        let products = catalogue();
        let state = state_with(vec![
            transaction(1, products[0].clone(), 1, TransactionStatus::Completed),
            transaction(2, products[1].clone(), 1, TransactionStatus::Failed),
        ]);
        let node = view(&state);
        let chips: Vec<Tone> = node
            .walk()
            .into_iter()
            .filter_map(|n| match n {
                Node::Chip { tone, .. } => Some(*tone),
                _ => None,
            })
            .collect();
        assert_eq!(chips, vec![Tone::Success, Tone::Error]);
    }

    #[test]
    fn test_edit_dialog_shows_error() {
        let products = catalogue();
        let mut state = state_with(vec![transaction(
            1,
            products[0].clone(),
            1,
            TransactionStatus::Pending,
        )]);
        state.transactions.edit = Some(EditDialog {
            transaction_id: 1,
            quantity: "0".to_string(),
            error: Some("Quantity must be greater than 0".to_string()),
        });

        let text = crate::ui::render::to_text(&view(&state));
        assert!(text.contains("Edit Transaction"));
        assert!(text.contains("^ Quantity must be greater than 0"));
    }
}
