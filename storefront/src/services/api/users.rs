//! # User Endpoints

use shared::User;

use super::client::ApiClient;
use super::error::{ApiError, ApiOperation};

/// All accounts. The server only answers this for staff tokens.
#[tracing::instrument(skip(client))]
pub async fn get_users(client: &ApiClient) -> Result<Vec<User>, ApiError> {
    client
        .execute_json(client.client.get(client.url("users/")), ApiOperation::ListUsers)
        .await
}
