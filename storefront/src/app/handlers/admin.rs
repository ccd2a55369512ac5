//! # Admin Handlers
//!
//! Product management for staff accounts. Field values go to the server
//! as typed; the server does the validation.

use parking_lot::RwLock;
use shared::{NewProduct, ProductImage};
use std::path::Path;
use std::sync::Arc;

use crate::app::events::AppEvent;
use crate::app::state::{AdminTab, AppState, NewProductField, NewProductForm};
use crate::app::tasks::TaskSpawner;
use crate::core::service::StorefrontApi;
use crate::services::api::ApiError;

pub(crate) fn handle_tab(state: Arc<RwLock<AppState>>, tab: AdminTab) {
    state.write().admin.tab = tab;
}

pub(crate) fn handle_open_add(state: Arc<RwLock<AppState>>) {
    state.write().admin.add_dialog.open();
}

pub(crate) fn handle_close_add(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    if !state.admin.add_call.is_loading() {
        state.admin.add_dialog.close();
    }
}

pub(crate) fn handle_input(state: Arc<RwLock<AppState>>, field: NewProductField, value: String) {
    state.write().admin.form.set(field, value);
}

/// Read the chosen image file, or fall back to the URL field.
async fn load_image(form: &NewProductForm) -> Result<Option<ProductImage>, ApiError> {
    if let Some(path) = &form.image_file {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read image file");
            ApiError::request(format!("Could not read image file: {}", e), None)
        })?;
        return Ok(Some(ProductImage::File {
            file_name: file_name(path),
            bytes,
        }));
    }

    let url = form.image_url.trim();
    Ok((!url.is_empty()).then(|| ProductImage::Url(url.to_string())))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

/// Submit the "Add Product" dialog
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_submit(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn StorefrontApi>,
    tasks: &TaskSpawner,
) {
    let form = {
        let mut guard = state.write();
        let state = &mut *guard;
        if state.admin.add_call.is_loading() {
            return;
        }
        state.admin.add_call.start(&mut state.loading);
        state.admin.form.clone()
    };

    tracing::info!(name = %form.name, has_file = form.image_file.is_some(), "Adding product");
    tasks.spawn("add_product", async move {
        let image = match load_image(&form).await {
            Ok(image) => image,
            Err(e) => return AppEvent::ProductAdded(Err(e)),
        };
        let product = NewProduct {
            name: form.name,
            price: form.price,
            quantity: form.quantity,
            image,
        };
        AppEvent::ProductAdded(api.add_product(product).await)
    });
}

/// Delete a product from the catalogue
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_delete(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn StorefrontApi>,
    tasks: &TaskSpawner,
    product_id: i64,
) {
    {
        let mut guard = state.write();
        let state = &mut *guard;
        if state.admin.delete_call.is_loading() {
            return;
        }
        state.admin.delete_call.start(&mut state.loading);
    }

    tracing::info!(product_id, "Deleting product");
    tasks.spawn("delete_product", async move {
        AppEvent::ProductDeleted {
            id: product_id,
            result: api.delete_product(product_id).await,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::tests::{test_app, MockApi};
    use crate::app::state::{Route, Severity};
    use crate::ui::action::Action;

    async fn admin_app(api: MockApi) -> crate::app::App {
        let (mut app, _) = test_app(api.staff(), Some("token-admin"));
        app.settle().await;
        app.dispatch(Action::Navigate(Route::Admin));
        app.settle().await;
        app
    }

    fn type_product(app: &mut crate::app::App, image_url: &str) {
        for (field, value) in [
            (NewProductField::Name, "Teapot"),
            (NewProductField::Price, "12.00"),
            (NewProductField::Quantity, "4"),
            (NewProductField::ImageUrl, image_url),
        ] {
            app.dispatch(Action::NewProductInput {
                field,
                value: value.to_string(),
            });
        }
    }

    #[tokio::test]
    async fn test_add_product_closes_dialog_and_refetches() {
        let api = MockApi::new();
        let added = api.added_log();
        let calls = api.call_log();
        let mut app = admin_app(api).await;

        app.dispatch(Action::OpenAddProduct);
        type_product(&mut app, "https://img.example/teapot.png");
        app.dispatch(Action::SubmitNewProduct);
        app.settle().await;

        let added = added.lock().clone();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].name, "Teapot");
        assert_eq!(
            added[0].image,
            Some(ProductImage::Url("https://img.example/teapot.png".to_string()))
        );
        assert_eq!(calls.lock().iter().filter(|c| *c == "get_products(1)").count(), 2);

        let state = app.state.read();
        assert!(!state.admin.add_dialog.is_open());
        assert_eq!(state.admin.form, NewProductForm::default());
        assert_eq!(state.notification.message, "Product added");
    }

    #[tokio::test]
    async fn test_image_file_takes_precedence_over_url() {
        let dir = std::env::temp_dir().join(format!("storefront-admin-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("teapot.png");
        std::fs::write(&path, b"png").unwrap();

        let api = MockApi::new();
        let added = api.added_log();
        let mut app = admin_app(api).await;

        type_product(&mut app, "https://img.example/ignored.png");
        app.dispatch(Action::NewProductInput {
            field: NewProductField::ImageFile,
            value: path.display().to_string(),
        });
        app.dispatch(Action::SubmitNewProduct);
        app.settle().await;

        assert_eq!(
            added.lock()[0].image,
            Some(ProductImage::File {
                file_name: "teapot.png".to_string(),
                bytes: b"png".to_vec(),
            })
        );
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_rejected_product_shows_server_message() {
        let mut app = admin_app(MockApi::new().reject_products("Price must be positive")).await;

        app.dispatch(Action::OpenAddProduct);
        type_product(&mut app, "");
        app.dispatch(Action::SubmitNewProduct);
        app.settle().await;

        let state = app.state.read();
        assert!(state.admin.add_dialog.is_open());
        assert_eq!(state.notification.severity, Severity::Error);
        assert_eq!(state.notification.message, "Price must be positive");
    }

    #[tokio::test]
    async fn test_delete_product() {
        let api = MockApi::new();
        let calls = api.call_log();
        let mut app = admin_app(api).await;

        app.dispatch(Action::DeleteProduct(2));
        app.settle().await;

        assert!(calls.lock().contains(&"delete_product(2)".to_string()));
        assert_eq!(app.state.read().notification.message, "Product deleted");
    }
}
