//! Table helpers

use crate::ui::node::Node;

/// Empty state message with an optional hint below it
pub fn empty_state(primary_text: &str, secondary_text: Option<&str>) -> Node {
    let mut nodes = vec![Node::text(primary_text)];
    if let Some(secondary) = secondary_text {
        nodes.push(Node::text(secondary));
    }
    Node::Column(nodes)
}

pub fn table(headers: &[&str], rows: Vec<Vec<Node>>) -> Node {
    Node::Table {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}
