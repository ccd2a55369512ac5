//! # Render Tree
//!
//! Screens build a [`Node`] tree from the state. Interactive nodes carry
//! the [`Action`] they trigger, so a front end only has to draw the tree
//! and hand actions back to [`crate::app::App::dispatch`].

use crate::app::state::Severity;
use crate::ui::action::Action;

/// Colour family of a chip or alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Default,
    Primary,
    Success,
    Warning,
    Error,
    Info,
}

impl From<Severity> for Tone {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Success => Tone::Success,
            Severity::Info => Tone::Info,
            Severity::Warning => Tone::Warning,
            Severity::Error => Tone::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Column(Vec<Node>),
    Row(Vec<Node>),
    Heading {
        level: u8,
        text: String,
    },
    Text(String),
    Alert {
        tone: Tone,
        text: String,
    },
    Chip {
        tone: Tone,
        label: String,
    },
    Badge {
        label: String,
        count: u32,
    },
    Button {
        label: String,
        action: Action,
        enabled: bool,
    },
    Input {
        name: String,
        label: String,
        value: String,
        error: Option<String>,
        secret: bool,
    },
    /// Single choice from a set of buttons
    Choice {
        label: String,
        options: Vec<Node>,
        selected: usize,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<Node>>,
    },
    Dialog {
        title: String,
        body: Vec<Node>,
    },
    Spinner(String),
    Empty,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Node::Heading {
            level: 1,
            text: text.into(),
        }
    }

    pub fn subheading(text: impl Into<String>) -> Self {
        Node::Heading {
            level: 2,
            text: text.into(),
        }
    }

    pub fn alert(tone: Tone, text: impl Into<String>) -> Self {
        Node::Alert {
            tone,
            text: text.into(),
        }
    }

    pub fn button(label: impl Into<String>, action: Action) -> Self {
        Node::Button {
            label: label.into(),
            action,
            enabled: true,
        }
    }

    /// Button that is drawn but cannot be pressed unless `enabled`
    pub fn button_if(label: impl Into<String>, action: Action, enabled: bool) -> Self {
        Node::Button {
            label: label.into(),
            action,
            enabled,
        }
    }

    pub fn dialog(title: impl Into<String>, body: Vec<Node>) -> Self {
        Node::Dialog {
            title: title.into(),
            body,
        }
    }

    /// Direct children, in order
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Column(nodes) | Node::Row(nodes) => nodes.iter().collect(),
            Node::Dialog { body, .. } => body.iter().collect(),
            Node::Choice { options, .. } => options.iter().collect(),
            Node::Table { rows, .. } => rows.iter().flatten().collect(),
            _ => Vec::new(),
        }
    }

    /// Depth-first walk over the tree, this node first
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.walk());
        }
        out
    }

    /// First button with `label`
    pub fn find_button(&self, label: &str) -> Option<&Node> {
        self.walk()
            .into_iter()
            .find(|n| matches!(n, Node::Button { label: l, .. } if l == label))
    }

    /// Enabled buttons and their actions, in tree order
    pub fn actions(&self) -> Vec<(&str, &Action)> {
        self.walk()
            .into_iter()
            .filter_map(|n| match n {
                Node::Button {
                    label,
                    action,
                    enabled: true,
                } => Some((label.as_str(), action)),
                _ => None,
            })
            .collect()
    }

    pub fn find_dialog(&self, title: &str) -> Option<&Node> {
        self.walk()
            .into_iter()
            .find(|n| matches!(n, Node::Dialog { title: t, .. } if t == title))
    }

    /// Whether any text-bearing node contains `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        self.walk().into_iter().any(|n| match n {
            Node::Heading { text, .. } | Node::Text(text) | Node::Alert { text, .. } => {
                text.contains(needle)
            }
            Node::Chip { label, .. } | Node::Badge { label, .. } | Node::Button { label, .. } => {
                label.contains(needle)
            }
            Node::Spinner(message) => message.contains(needle),
            Node::Dialog { title, .. } => title.contains(needle),
            _ => false,
        })
    }
}
