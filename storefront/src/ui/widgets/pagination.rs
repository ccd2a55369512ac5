//! Page controls

use crate::ui::action::Action;
use crate::ui::node::Node;
use crate::utils::pagination::Pagination;

/// Previous/next controls plus one button per page. Nothing is drawn when
/// everything fits on one page.
pub fn page_controls(pagination: &Pagination, to_action: impl Fn(u32) -> Action) -> Node {
    if !pagination.is_visible() {
        return Node::Empty;
    }

    let current = pagination.page();
    let mut nodes = vec![Node::button_if(
        "<",
        to_action(current.saturating_sub(1).max(1)),
        pagination.has_previous(),
    )];
    for page in 1..=pagination.last_page() {
        nodes.push(Node::button_if(page.to_string(), to_action(page), page != current));
    }
    nodes.push(Node::button_if(
        ">",
        to_action(current + 1),
        pagination.has_next(),
    ));
    Node::Row(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_hidden_for_single_page() {
        let mut pagination = Pagination::default();
        pagination.set_total(4);
        assert_eq!(page_controls(&pagination, Action::ProductsPage), Node::Empty);
    }

    #[test]
    fn test_controls_cover_every_page() {
        let mut pagination = Pagination::default();
        pagination.set_total(25);
        let node = page_controls(&pagination, Action::ProductsPage);

        let actions: Vec<&str> = node.actions().into_iter().map(|(label, _)| label).collect();
        assert_eq!(actions, vec!["2", "3", "4", "5", ">"]);
    }
}
