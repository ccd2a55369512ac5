//! # Transaction Endpoints

use shared::{Page, Transaction, UpdateTransactionRequest};

use super::client::ApiClient;
use super::error::{ApiError, ApiOperation};

#[tracing::instrument(skip(client))]
pub async fn get_transactions(client: &ApiClient, page: u32) -> Result<Page<Transaction>, ApiError> {
    client
        .execute_json(
            client
                .client
                .get(client.url("transactions/"))
                .query(&[("page", page)]),
            ApiOperation::ListTransactions,
        )
        .await
}

#[tracing::instrument(skip(client))]
pub async fn update_transaction(
    client: &ApiClient,
    id: i64,
    quantity: i64,
) -> Result<Transaction, ApiError> {
    client
        .execute_json(
            client
                .client
                .patch(client.url(&format!("transactions/{}/", id)))
                .json(&UpdateTransactionRequest { quantity }),
            ApiOperation::UpdateTransaction,
        )
        .await
}

#[tracing::instrument(skip(client))]
pub async fn delete_transaction(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client
        .execute(
            client.client.delete(client.url(&format!("transactions/{}/", id))),
            ApiOperation::DeleteTransaction,
        )
        .await?;
    Ok(())
}
