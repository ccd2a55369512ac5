//! # API Client
//!
//! HTTP client for the storefront REST API. Injects the stored token and
//! normalizes every failure into an [`ApiError`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    ErrorResponse, LoginRequest, NewProduct, Page, PaymentMethod, Product, SignupRequest,
    SignupResponse, TokenResponse, Transaction, User,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::error::{ApiError, ApiOperation};
use crate::config::ClientConfig;
use crate::core::service::StorefrontApi;
use crate::services::storage::{KeyValueStore, TOKEN_KEY};

/// HTTP client for the storefront API.
///
/// Holds a pooled `reqwest::Client` and the key-value store the token is
/// read from on every request, so a login or logout elsewhere in the app
/// takes effect on the next call.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    storage: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// The request timeout comes from `STOREFRONT_HTTP_TIMEOUT_SECS`.
    pub fn new(config: &ClientConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        Self::build(&config.api_url, config.http_timeout, storage)
    }

    /// Create a client against an explicit base URL with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self::build(&base_url.into(), Duration::from_secs(10), storage)
    }

    fn build(base_url: &str, timeout: Duration, storage: Arc<dyn KeyValueStore>) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                timeout_secs = timeout.as_secs(),
                "Failed to build HTTP client, falling back to defaults without the configured timeout"
            );
            Client::new()
        });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            storage,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `products/`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach `Authorization: Token <token>` when a token is stored.
    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.storage.get(TOKEN_KEY) {
            Some(token) if !token.is_empty() => {
                request.header(reqwest::header::AUTHORIZATION, format!("Token {}", token))
            }
            _ => request,
        }
    }

    /// Send a request and turn non-success responses into [`ApiError`].
    ///
    /// A 401 removes the stored token before returning
    /// [`ApiError::Unauthorized`].
    pub(crate) async fn execute(
        &self,
        request: RequestBuilder,
        operation: ApiOperation,
    ) -> Result<Response, ApiError> {
        let request_id = uuid::Uuid::new_v4();
        let start = Instant::now();

        let response = self.authorize(request).send().await.map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                operation = operation.name(),
                error = %e,
                "Network error"
            );
            operation.fallback(None)
        })?;

        let status = response.status();
        let duration = start.elapsed();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                request_id = %request_id,
                operation = operation.name(),
                duration_ms = duration.as_millis(),
                "Unauthorized response, clearing stored token"
            );
            if let Err(e) = self.storage.remove(TOKEN_KEY) {
                tracing::error!(error = %e, "Failed to remove stored token");
            }
            return Err(ApiError::Unauthorized);
        }

        if status.is_success() {
            tracing::debug!(
                request_id = %request_id,
                operation = operation.name(),
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                "API call completed"
            );
            return Ok(response);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) if !body.error.trim().is_empty() => body.error,
            _ => operation.fallback_message().to_string(),
        };

        tracing::warn!(
            request_id = %request_id,
            operation = operation.name(),
            status = status.as_u16(),
            error = %message,
            duration_ms = duration.as_millis(),
            "API call failed"
        );
        Err(ApiError::request(message, Some(status.as_u16())))
    }

    /// [`execute`](Self::execute) and parse the JSON body.
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: ApiOperation,
    ) -> Result<T, ApiError> {
        let response = self.execute(request, operation).await?;
        let status = response.status().as_u16();
        response.json::<T>().await.map_err(|e| {
            tracing::error!(operation = operation.name(), error = %e, "Response parse error");
            operation.fallback(Some(status))
        })
    }
}

#[async_trait]
impl StorefrontApi for ApiClient {
    async fn login(&self, request: LoginRequest) -> Result<TokenResponse, ApiError> {
        super::auth::login(self, request).await
    }

    async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, ApiError> {
        super::auth::signup(self, request).await
    }

    async fn get_products(&self, page: u32) -> Result<Page<Product>, ApiError> {
        super::products::get_products(self, page).await
    }

    async fn add_product(&self, product: NewProduct) -> Result<Product, ApiError> {
        super::products::add_product(self, product).await
    }

    async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        super::products::delete_product(self, id).await
    }

    async fn purchase_product(
        &self,
        id: i64,
        quantity: u32,
        payment_method: PaymentMethod,
    ) -> Result<Transaction, ApiError> {
        super::products::purchase_product(self, id, quantity, payment_method).await
    }

    async fn get_transactions(&self, page: u32) -> Result<Page<Transaction>, ApiError> {
        super::transactions::get_transactions(self, page).await
    }

    async fn update_transaction(&self, id: i64, quantity: i64) -> Result<Transaction, ApiError> {
        super::transactions::update_transaction(self, id, quantity).await
    }

    async fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        super::transactions::delete_transaction(self, id).await
    }

    async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        super::users::get_users(self).await
    }

    async fn get_current_user(&self) -> Result<User, ApiError> {
        super::auth::get_current_user(self).await
    }
}
