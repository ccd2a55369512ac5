//! Form field nodes

use crate::ui::node::Node;
use crate::utils::form::Form;

/// Input bound to one field of `form`; the error shows once the field has
/// been touched.
pub fn form_input(form: &Form, name: &str, label: &str, secret: bool) -> Node {
    Node::Input {
        name: name.to_string(),
        label: label.to_string(),
        value: form.value(name).to_string(),
        error: form.error(name).map(ToString::to_string),
        secret,
    }
}

/// Free-standing input with an optional error
pub fn input(name: &str, label: &str, value: &str, error: Option<&str>) -> Node {
    Node::Input {
        name: name.to_string(),
        label: label.to_string(),
        value: value.to_string(),
        error: error.map(ToString::to_string),
        secret: false,
    }
}
