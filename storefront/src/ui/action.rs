//! # UI Actions
//!
//! Everything a user can do, as values. Screens attach actions to the
//! nodes that trigger them; [`crate::app::App::dispatch`] applies them.

use shared::PaymentMethod;

use crate::app::state::{AdminTab, NewProductField, Route};
use crate::utils::record::{ProductField, TransactionField};

/// Which auth form a field edit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthForm {
    Login,
    Signup,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Route),
    Logout,
    CloseNotification,
    Resize { width: u32, height: u32 },

    // Login / signup
    FormInput {
        form: AuthForm,
        field: String,
        value: String,
    },
    FormBlur {
        form: AuthForm,
        field: String,
    },
    SubmitLogin,
    SubmitSignup,

    // Products
    ChangeQuantity { product_id: i64, delta: i32 },
    AddToCart { product_id: i64 },
    SearchProducts(String),
    SortProducts(ProductField),
    ResetProductSort,
    ProductsPage(u32),
    Refresh,

    // Cart
    IncrementItem(i64),
    DecrementItem(i64),
    SetItemQuantity { product_id: i64, quantity: u32 },
    RemoveItem(i64),
    OpenCheckout,
    CloseCheckout,
    SelectPaymentMethod(PaymentMethod),
    ConfirmCheckout,

    // Transactions
    TransactionsPage(u32),
    EditTransaction(i64),
    EditQuantityInput(String),
    SaveTransactionEdit,
    CancelTransactionEdit,
    DeleteTransaction(i64),
    ConfirmDeleteTransaction,
    CancelDeleteTransaction,
    FilterTransactions { field: TransactionField, value: String },
    ClearTransactionFilters,

    // Admin
    AdminTab(AdminTab),
    OpenAddProduct,
    CloseAddProduct,
    NewProductInput { field: NewProductField, value: String },
    SubmitNewProduct,
    DeleteProduct(i64),
}

impl Action {
    /// Actions that would change the cart (or the session owning it); these
    /// are refused while a checkout is running.
    pub fn touches_cart(&self) -> bool {
        matches!(
            self,
            Action::AddToCart { .. }
                | Action::IncrementItem(_)
                | Action::DecrementItem(_)
                | Action::SetItemQuantity { .. }
                | Action::RemoveItem(_)
                | Action::CloseCheckout
                | Action::ConfirmCheckout
                | Action::Logout
        )
    }
}
