//! # Application State Types
//!
//! Everything the client knows at a point in time: route, session, cart,
//! cached server data, side panels and per-screen view state.

use shared::{PaymentMethod, Product, Transaction, User};
use std::path::PathBuf;
use std::time::Duration;

use super::cart::Cart;
use super::query::QueryCache;
use crate::utils::api_call::{ApiCall, ApiCallOptions};
use crate::utils::debounce::Debounced;
use crate::utils::form::{Form, ValidationRule};
use crate::utils::pagination::Pagination;
use crate::utils::record::{ProductField, TransactionField};
use crate::utils::search::SearchState;
use crate::utils::sort::SortState;
use crate::utils::toggle::Modal;
use crate::utils::validation::{validate_email, validate_password, validate_required, validate_username};
use crate::utils::viewport::Viewport;

/// Delay before a typed product search is applied
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Application routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Products,
    Cart,
    Transactions,
    Admin,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[
            Route::Login,
            Route::Signup,
            Route::Products,
            Route::Cart,
            Route::Transactions,
            Route::Admin,
        ]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Products => "/",
            Route::Cart => "/cart",
            Route::Transactions => "/transactions",
            Route::Admin => "/admin",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::all().iter().copied().find(|r| r.path() == path)
    }

    /// Title for the page header
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Signup => "Sign Up",
            Route::Products => "Products",
            Route::Cart => "Shopping Cart",
            Route::Transactions => "Transaction History",
            Route::Admin => "Admin Dashboard",
        }
    }

    /// Login and signup are the only public routes
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::Signup)
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Admin)
    }
}

/// Where the client stands with the API token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthSession {
    #[default]
    LoggedOut,
    /// Token stored, current user not yet confirmed. Treated as logged in.
    Unverified,
    Authenticated { user: User },
}

impl AuthSession {
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, AuthSession::LoggedOut)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, AuthSession::Authenticated { user } if user.is_staff)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthSession::Authenticated { user } => Some(user),
            _ => None,
        }
    }
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Single toast notification; a new one replaces the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub open: bool,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.message = message.into();
        self.severity = severity;
        self.open = true;
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Warning);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Info);
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Full-screen busy indicator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingOverlay {
    pub visible: bool,
    pub message: String,
}

impl LoadingOverlay {
    pub const DEFAULT_MESSAGE: &'static str = "Loading...";

    /// Show with `message`, or "Loading..." when `None`
    pub fn show(&mut self, message: Option<&str>) {
        self.message = message.unwrap_or(Self::DEFAULT_MESSAGE).to_string();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Products screen state
#[derive(Debug)]
pub struct ProductsView {
    pub pagination: Pagination,
    /// Picker value per product id; absent means 1
    pub quantities: std::collections::HashMap<i64, u32>,
    pub search_input: Debounced<String>,
    pub search: SearchState<ProductField>,
    pub sort: SortState<ProductField>,
}

impl Default for ProductsView {
    fn default() -> Self {
        Self {
            pagination: Pagination::default(),
            quantities: Default::default(),
            search_input: Debounced::new(String::new(), SEARCH_DEBOUNCE),
            search: SearchState::new(vec![ProductField::Name]),
            sort: SortState::default(),
        }
    }
}

impl ProductsView {
    pub fn quantity(&self, product_id: i64) -> u32 {
        self.quantities.get(&product_id).copied().unwrap_or(1)
    }
}

/// Cart screen and checkout dialog
#[derive(Debug, Default)]
pub struct CartView {
    pub checkout_dialog: Modal,
    pub payment_method: PaymentMethod,
    /// Inline checkout error
    pub error: Option<String>,
    pub in_progress: bool,
    /// Lines purchased so far in the running checkout
    pub completed_lines: usize,
}

/// Quantity edit dialog for one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDialog {
    pub transaction_id: i64,
    pub quantity: String,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct TransactionsView {
    pub pagination: Pagination,
    pub edit: Option<EditDialog>,
    /// Transaction awaiting delete confirmation
    pub pending_delete: Option<i64>,
    pub filters: SearchState<TransactionField>,
    pub update_call: ApiCall<Transaction>,
    pub delete_call: ApiCall<()>,
}

impl Default for TransactionsView {
    fn default() -> Self {
        Self {
            pagination: Pagination::default(),
            edit: None,
            pending_delete: None,
            filters: SearchState::new(vec![TransactionField::Product]),
            update_call: ApiCall::new(
                ApiCallOptions::default()
                    .loading_message("Updating transaction...")
                    .success_message("Transaction updated")
                    .server_errors(),
            ),
            delete_call: ApiCall::new(
                ApiCallOptions::default()
                    .loading_message("Deleting transaction...")
                    .success_message("Transaction deleted")
                    .server_errors(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Products,
    Users,
}

impl AdminTab {
    pub fn label(&self) -> &'static str {
        match self {
            AdminTab::Products => "Products",
            AdminTab::Users => "Users",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewProductField {
    Name,
    Price,
    Quantity,
    ImageUrl,
    ImageFile,
}

/// "Add Product" dialog fields as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProductForm {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub image_url: String,
    pub image_file: Option<PathBuf>,
}

impl NewProductForm {
    pub fn set(&mut self, field: NewProductField, value: String) {
        match field {
            NewProductField::Name => self.name = value,
            NewProductField::Price => self.price = value,
            NewProductField::Quantity => self.quantity = value,
            NewProductField::ImageUrl => self.image_url = value,
            NewProductField::ImageFile => {
                self.image_file = Some(value).filter(|v| !v.trim().is_empty()).map(PathBuf::from)
            }
        }
    }
}

#[derive(Debug)]
pub struct AdminView {
    pub tab: AdminTab,
    pub add_dialog: Modal,
    pub form: NewProductForm,
    pub add_call: ApiCall<Product>,
    pub delete_call: ApiCall<()>,
}

impl Default for AdminView {
    fn default() -> Self {
        Self {
            tab: AdminTab::default(),
            add_dialog: Modal::default(),
            form: NewProductForm::default(),
            add_call: ApiCall::new(
                ApiCallOptions::default()
                    .loading_message("Adding product...")
                    .success_message("Product added")
                    .server_errors(),
            ),
            delete_call: ApiCall::new(
                ApiCallOptions::default()
                    .without_loading()
                    .success_message("Product deleted")
                    .server_errors(),
            ),
        }
    }
}

pub const LOGIN_FIELDS: &[&str] = &["username", "password"];
pub const SIGNUP_FIELDS: &[&str] = &["username", "email", "password"];

pub fn login_form() -> Form {
    Form::new(
        LOGIN_FIELDS,
        vec![
            ValidationRule::check("username", |v| validate_required(v, "Username")),
            ValidationRule::check("password", |v| validate_required(v, "Password")),
        ],
    )
}

pub fn signup_form() -> Form {
    Form::new(
        SIGNUP_FIELDS,
        vec![
            ValidationRule::check("username", validate_username),
            ValidationRule::check("email", validate_email),
            ValidationRule::check("password", validate_password),
        ],
    )
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub route: Route,
    pub session: AuthSession,
    pub cart: Cart,
    pub queries: QueryCache,
    pub loading: LoadingOverlay,
    pub notification: Notification,
    pub login_form: Form,
    /// Server error from the last login attempt
    pub login_error: Option<String>,
    pub signup_form: Form,
    pub signup_error: Option<String>,
    pub products: ProductsView,
    pub cart_view: CartView,
    pub transactions: TransactionsView,
    pub admin: AdminView,
    pub viewport: Viewport,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Logged out, on the login page, nothing cached.
    pub fn new() -> Self {
        Self {
            route: Route::Login,
            session: AuthSession::LoggedOut,
            cart: Cart::new(),
            queries: QueryCache::new(),
            loading: LoadingOverlay::default(),
            notification: Notification::default(),
            login_form: login_form(),
            login_error: None,
            signup_form: signup_form(),
            signup_error: None,
            products: ProductsView::default(),
            cart_view: CartView::default(),
            transactions: TransactionsView::default(),
            admin: AdminView::default(),
            viewport: Viewport::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    /// Route actually shown when `requested` is asked for in the current
    /// session.
    pub fn resolve_route(&self, requested: Route) -> Route {
        let authenticated = self.is_authenticated();
        match requested {
            Route::Login | Route::Signup if authenticated => Route::Products,
            Route::Admin if !self.is_admin() => {
                if authenticated {
                    Route::Products
                } else {
                    Route::Login
                }
            }
            route if route.requires_auth() && !authenticated => Route::Login,
            route => route,
        }
    }
}
