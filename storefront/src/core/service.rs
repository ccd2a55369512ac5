//! # Service Traits
//!
//! The storefront REST API as a trait, so the application layer can be
//! driven by the HTTP client in production and by in-memory mocks in tests.

use async_trait::async_trait;
use shared::{
    LoginRequest, NewProduct, Page, PaymentMethod, Product, SignupRequest, SignupResponse,
    TokenResponse, Transaction, User,
};

use crate::services::api::ApiError;

/// Operations exposed by the storefront REST API.
///
/// Every method except `login` and `signup` is sent with the stored token.
/// Implementations report a 401 as [`ApiError::Unauthorized`] after removing
/// the stored token.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// `POST /token/`
    async fn login(&self, request: LoginRequest) -> Result<TokenResponse, ApiError>;

    /// `POST /signup/`
    async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, ApiError>;

    /// `GET /products/?page=N`
    async fn get_products(&self, page: u32) -> Result<Page<Product>, ApiError>;

    /// `POST /products/` as multipart form data
    async fn add_product(&self, product: NewProduct) -> Result<Product, ApiError>;

    /// `DELETE /products/{id}/`
    async fn delete_product(&self, id: i64) -> Result<(), ApiError>;

    /// `POST /products/{id}/purchase/`
    async fn purchase_product(
        &self,
        id: i64,
        quantity: u32,
        payment_method: PaymentMethod,
    ) -> Result<Transaction, ApiError>;

    /// `GET /transactions/?page=N`
    async fn get_transactions(&self, page: u32) -> Result<Page<Transaction>, ApiError>;

    /// `PATCH /transactions/{id}/`
    async fn update_transaction(&self, id: i64, quantity: i64) -> Result<Transaction, ApiError>;

    /// `DELETE /transactions/{id}/`
    async fn delete_transaction(&self, id: i64) -> Result<(), ApiError>;

    /// `GET /users/`
    async fn get_users(&self) -> Result<Vec<User>, ApiError>;

    /// `GET /users/me/`
    async fn get_current_user(&self) -> Result<User, ApiError>;
}
