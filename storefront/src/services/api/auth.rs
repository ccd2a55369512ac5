//! # Authentication Endpoints
//!
//! Token login, signup and the current-user lookup used to verify a
//! session. Storing or clearing the token is the session's job; these
//! functions only talk HTTP.

use shared::{LoginRequest, SignupRequest, SignupResponse, TokenResponse, User};

use super::client::ApiClient;
use super::error::{ApiError, ApiOperation};

/// Exchange credentials for a token.
#[tracing::instrument(skip(client, request), fields(username = %request.username))]
pub async fn login(client: &ApiClient, request: LoginRequest) -> Result<TokenResponse, ApiError> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let result: Result<TokenResponse, ApiError> = client
        .execute_json(
            client.client.post(client.url("token/")).json(&request),
            ApiOperation::Login,
        )
        .await;

    match &result {
        Ok(_) => tracing::info!(duration_ms = start.elapsed().as_millis(), "Login successful"),
        Err(e) => tracing::warn!(error = %e, "Login failed"),
    }
    result
}

/// Create an account. The response already carries a token.
#[tracing::instrument(skip(client, request), fields(username = %request.username))]
pub async fn signup(client: &ApiClient, request: SignupRequest) -> Result<SignupResponse, ApiError> {
    tracing::info!("Attempting signup");
    client
        .execute_json(
            client.client.post(client.url("signup/")).json(&request),
            ApiOperation::Signup,
        )
        .await
}

/// Profile of the token's owner (`is_staff` decides admin access).
#[tracing::instrument(skip(client))]
pub async fn get_current_user(client: &ApiClient) -> Result<User, ApiError> {
    client
        .execute_json(client.client.get(client.url("users/me/")), ApiOperation::CurrentUser)
        .await
}
