//! HTTP client tests against an in-process axum server.

use axum::extract::Path;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use shared::{LoginRequest, PaymentMethod, TransactionStatus};
use std::sync::Arc;
use storefront::core::StorefrontApi;
use storefront::services::api::{ApiClient, ApiError};
use storefront::services::storage::{KeyValueStore, MemoryStore, TOKEN_KEY};

fn mug() -> Value {
    json!({ "id": 1, "name": "Mug", "price": "4.50", "quantity": 10, "image_url": null })
}

async fn products(headers: HeaderMap) -> Response {
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some("Token good") => Json(json!({
            "count": 7,
            "next": "http://localhost/api/products/?page=2",
            "previous": null,
            "results": [mug()],
        }))
        .into_response(),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Invalid token." }))).into_response(),
    }
}

async fn token(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret123" {
        Json(json!({ "token": "good" })).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Unable to log in with provided credentials." })),
        )
            .into_response()
    }
}

async fn purchase(Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    if id != 1 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Not enough stock available" })),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 42,
            "product": mug(),
            "quantity": body["quantity"],
            "total_amount": "9.00",
            "payment_method": body["payment_method"],
            "status": "COMPLETED",
            "created_at": "2026-01-02T10:00:00Z",
        })),
    )
        .into_response()
}

async fn delete_transaction(Path(_id): Path<i64>) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
}

async fn delete_product(Path(_id): Path<i64>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn spawn_server() -> String {
    let router = Router::new()
        .route("/api/products/", get(products))
        .route("/api/token/", post(token))
        .route("/api/products/:id/purchase/", post(purchase))
        .route("/api/products/:id/", delete(delete_product))
        .route("/api/transactions/:id/", delete(delete_transaction));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn client(base_url: &str, token: Option<&str>) -> (ApiClient, Arc<MemoryStore>) {
    let store = Arc::new(match token {
        Some(token) => MemoryStore::with_entry(TOKEN_KEY, token),
        None => MemoryStore::new(),
    });
    (ApiClient::with_base_url(base_url, store.clone()), store)
}

#[tokio::test]
async fn test_stored_token_is_sent() {
    let base_url = spawn_server().await;
    let (api, _store) = client(&base_url, Some("good"));

    let page = api.get_products(1).await.unwrap();
    assert_eq!(page.count, 7);
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].name, "Mug");
}

#[tokio::test]
async fn test_unauthorized_clears_token() {
    let base_url = spawn_server().await;
    let (api, store) = client(&base_url, Some("expired"));

    let err = api.get_products(1).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[tokio::test]
async fn test_error_field_becomes_message() {
    let base_url = spawn_server().await;
    let (api, _store) = client(&base_url, None);

    let err = api
        .login(LoginRequest {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unable to log in with provided credentials.");
    assert_eq!(err.status(), Some(400));

    let ok = api
        .login(LoginRequest {
            username: "alice".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(ok.token, "good");
}

#[tokio::test]
async fn test_unexplained_failure_uses_fallback() {
    let base_url = spawn_server().await;
    let (api, _store) = client(&base_url, Some("good"));

    let err = api.delete_transaction(10).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete transaction");
    assert_eq!(err.status(), Some(500));

    api.delete_product(1).await.unwrap();
}

#[tokio::test]
async fn test_purchase_round_trip() {
    let base_url = spawn_server().await;
    let (api, _store) = client(&base_url, Some("good"));

    let transaction = api.purchase_product(1, 2, PaymentMethod::Cash).await.unwrap();
    assert_eq!(transaction.id, 42);
    assert_eq!(transaction.quantity, 2);
    assert_eq!(transaction.payment_method, PaymentMethod::Cash);
    assert_eq!(transaction.status, TransactionStatus::Completed);

    let err = api.purchase_product(2, 1, PaymentMethod::App).await.unwrap_err();
    assert_eq!(err.to_string(), "Not enough stock available");
}
