//! # Product Endpoints

use reqwest::multipart::{Form, Part};
use shared::{NewProduct, Page, PaymentMethod, Product, ProductImage, PurchaseRequest, Transaction};

use super::client::ApiClient;
use super::error::{ApiError, ApiOperation};

#[tracing::instrument(skip(client))]
pub async fn get_products(client: &ApiClient, page: u32) -> Result<Page<Product>, ApiError> {
    let page: Page<Product> = client
        .execute_json(
            client
                .client
                .get(client.url("products/"))
                .query(&[("page", page)]),
            ApiOperation::ListProducts,
        )
        .await?;
    tracing::debug!(count = page.count, returned = page.results.len(), "Products fetched");
    Ok(page)
}

/// Create a product as multipart form data.
///
/// An uploaded file goes out as the `image` part; a URL as the `image_url`
/// field. Price and quantity are sent as entered.
#[tracing::instrument(skip(client, product), fields(name = %product.name))]
pub async fn add_product(client: &ApiClient, product: NewProduct) -> Result<Product, ApiError> {
    let mut form = Form::new()
        .text("name", product.name)
        .text("price", product.price)
        .text("quantity", product.quantity);

    match product.image {
        Some(ProductImage::File { file_name, bytes }) => {
            tracing::debug!(file_name = %file_name, size = bytes.len(), "Attaching image file");
            form = form.part("image", Part::bytes(bytes).file_name(file_name));
        }
        Some(ProductImage::Url(url)) if !url.trim().is_empty() => {
            form = form.text("image_url", url);
        }
        _ => {}
    }

    client
        .execute_json(
            client.client.post(client.url("products/")).multipart(form),
            ApiOperation::AddProduct,
        )
        .await
}

#[tracing::instrument(skip(client))]
pub async fn delete_product(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client
        .execute(
            client.client.delete(client.url(&format!("products/{}/", id))),
            ApiOperation::DeleteProduct,
        )
        .await?;
    Ok(())
}

/// Buy `quantity` units of one product.
#[tracing::instrument(skip(client))]
pub async fn purchase_product(
    client: &ApiClient,
    id: i64,
    quantity: u32,
    payment_method: PaymentMethod,
) -> Result<Transaction, ApiError> {
    let request = PurchaseRequest {
        quantity,
        payment_method,
    };
    let transaction: Transaction = client
        .execute_json(
            client
                .client
                .post(client.url(&format!("products/{}/purchase/", id)))
                .json(&request),
            ApiOperation::Purchase,
        )
        .await?;
    tracing::info!(transaction_id = transaction.id, "Purchase recorded");
    Ok(transaction)
}
