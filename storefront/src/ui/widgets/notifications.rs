//! # Notifications
//!
//! The toast and the loading overlay drawn above every screen.

use crate::app::state::{LoadingOverlay, Notification};
use crate::ui::action::Action;
use crate::ui::node::{Node, Tone};

pub fn toast(notification: &Notification) -> Node {
    if !notification.open {
        return Node::Empty;
    }
    Node::Row(vec![
        Node::alert(Tone::from(notification.severity), notification.message.clone()),
        Node::button("Dismiss", Action::CloseNotification),
    ])
}

pub fn loading_overlay(loading: &LoadingOverlay) -> Node {
    if !loading.visible {
        return Node::Empty;
    }
    Node::Spinner(loading.message.clone())
}
