//! # Authentication Screens
//!
//! Login and signup forms.

use crate::app::state::{AppState, Route};
use crate::ui::action::Action;
use crate::ui::node::{Node, Tone};
use crate::ui::widgets::forms::form_input;

pub fn login_view(state: &AppState) -> Node {
    let form = &state.login_form;
    let mut nodes = vec![Node::heading("Login")];
    if let Some(error) = &state.login_error {
        nodes.push(Node::alert(Tone::Error, error.clone()));
    }
    nodes.push(form_input(form, "username", "Username", false));
    nodes.push(form_input(form, "password", "Password", true));
    nodes.push(Node::button_if(
        if form.is_submitting() { "Logging in..." } else { "Login" },
        Action::SubmitLogin,
        !form.is_submitting(),
    ));
    nodes.push(Node::button(
        "Don't have an account? Sign Up",
        Action::Navigate(Route::Signup),
    ));
    Node::Column(nodes)
}

pub fn signup_view(state: &AppState) -> Node {
    let form = &state.signup_form;
    let mut nodes = vec![Node::heading("Sign Up")];
    if let Some(error) = &state.signup_error {
        nodes.push(Node::alert(Tone::Error, error.clone()));
    }
    nodes.push(form_input(form, "username", "Username", false));
    nodes.push(form_input(form, "email", "Email", false));
    nodes.push(form_input(form, "password", "Password", true));
    nodes.push(Node::button_if(
        if form.is_submitting() { "Signing up..." } else { "Sign Up" },
        Action::SubmitSignup,
        !form.is_submitting(),
    ));
    nodes.push(Node::button(
        "Already have an account? Login",
        Action::Navigate(Route::Login),
    ));
    Node::Column(nodes)
}
