//! # Product Handlers
//!
//! Quantity pickers, add-to-cart, search, sort and paging on the product
//! grid.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;

use crate::app::state::AppState;
use crate::core::error::AppError;
use crate::utils::record::ProductField;

/// Move a product's quantity picker by `delta`, kept within `1..=stock`.
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_change_quantity(state: Arc<RwLock<AppState>>, product_id: i64, delta: i32) {
    let mut state = state.write();
    let Some(stock) = state.queries.find_product(product_id).map(|p| p.stock()) else {
        tracing::debug!(product_id, "Quantity change for unknown product");
        return;
    };

    let current = i64::from(state.products.quantity(product_id));
    let next = (current + i64::from(delta)).clamp(1, i64::from(stock.max(1)));
    state
        .products
        .quantities
        .insert(product_id, u32::try_from(next).unwrap_or(1));
}

/// Add the picked quantity of a listed product to the cart
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_add_to_cart(state: Arc<RwLock<AppState>>, product_id: i64) {
    let mut state = state.write();
    let Some(product) = state.queries.find_product(product_id).cloned() else {
        tracing::warn!(product_id, "Add to cart for a product that is not loaded");
        return;
    };

    let requested = state.products.quantity(product_id);
    let name = product.name.clone();
    match state.cart.add(product, requested) {
        Ok(in_cart) => {
            tracing::info!(product_id, requested, in_cart, "Added to cart");
            state.products.quantities.remove(&product_id);
            state.notification.success(format!("{} added to cart", name));
        }
        Err(e) => {
            let err = AppError::from(e);
            tracing::info!(product_id, error = %err, "Add to cart refused");
            state.notification.warning(err.user_message());
        }
    }
}

/// Record a keystroke in the search box; applied after the debounce delay.
pub(crate) fn handle_search_input(state: Arc<RwLock<AppState>>, term: String, now: Instant) {
    state.write().products.search_input.set(term, now);
}

/// Apply a settled search term. Returns true when the filter changed.
pub(crate) fn poll_search(state: &Arc<RwLock<AppState>>, now: Instant) -> bool {
    let mut state = state.write();
    match state.products.search_input.poll(now) {
        Some(term) => {
            tracing::debug!(term = %term, "Applying product search");
            state.products.search.handle_search(term);
            true
        }
        None => false,
    }
}

pub(crate) fn handle_sort(state: Arc<RwLock<AppState>>, field: ProductField) {
    state.write().products.sort.handle_sort(field);
}

pub(crate) fn handle_reset_sort(state: Arc<RwLock<AppState>>) {
    state.write().products.sort.reset();
}

/// Switch the product grid to `page`
///
/// Internal handler function - use [`crate::app::App::dispatch`] instead.
pub(crate) fn handle_page(state: Arc<RwLock<AppState>>, page: u32) {
    let mut state = state.write();
    if let Err(e) = state.products.pagination.set_page(page) {
        let err = AppError::from(e);
        tracing::info!(page, error = %err, "Product page rejected");
        state.notification.warning(err.user_message());
    }
}

/// Products of the current page after search and sort, as the grid shows
/// them. `None` until the page has loaded.
pub fn visible_products(state: &AppState) -> Option<Vec<shared::Product>> {
    let page = state.queries.products(state.products.pagination.page())?;
    let matched = state.products.search.apply(&page.results);
    Some(state.products.sort.apply(&matched))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::tests::{test_app, MockApi};
    use crate::app::state::{Severity, SEARCH_DEBOUNCE};
    use crate::ui::action::Action;

    #[tokio::test]
    async fn test_quantity_picker_stays_within_stock() {
        let (mut app, _) = test_app(MockApi::new(), Some("token-alice"));
        app.settle().await;

        // product 2 has 3 in stock
        for _ in 0..5 {
            app.dispatch(Action::ChangeQuantity { product_id: 2, delta: 1 });
        }
        assert_eq!(app.state.read().products.quantity(2), 3);
        for _ in 0..5 {
            app.dispatch(Action::ChangeQuantity { product_id: 2, delta: -1 });
        }
        assert_eq!(app.state.read().products.quantity(2), 1);
    }

    #[tokio::test]
    async fn test_add_to_cart_uses_picked_quantity() {
        let (mut app, _) = test_app(MockApi::new(), Some("token-alice"));
        app.settle().await;

        app.dispatch(Action::ChangeQuantity { product_id: 1, delta: 2 });
        app.dispatch(Action::AddToCart { product_id: 1 });

        let state = app.state.read();
        assert_eq!(state.cart.item(1).map(|i| i.quantity), Some(3));
        assert_eq!(state.products.quantity(1), 1);
        assert_eq!(state.notification.severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_sold_out_product_is_refused() {
        let (mut app, _) = test_app(MockApi::new(), Some("token-alice"));
        app.settle().await;

        // product 3 is sold out
        app.dispatch(Action::AddToCart { product_id: 3 });

        let state = app.state.read();
        assert!(state.cart.is_empty());
        assert_eq!(state.notification.severity, Severity::Warning);
    }

    #[tokio::test]
    async fn test_search_applies_after_debounce() {
        let (mut app, _) = test_app(MockApi::new(), Some("token-alice"));
        app.settle().await;

        let start = Instant::now();
        handle_search_input(app.state.clone(), "m".to_string(), start);
        handle_search_input(app.state.clone(), "mug".to_string(), start);
        assert!(!poll_search(&app.state, start));
        assert_eq!(visible_products(&app.state.read()).map(|p| p.len()), Some(3));

        assert!(poll_search(&app.state, start + SEARCH_DEBOUNCE));
        let names: Vec<String> = visible_products(&app.state.read())
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Mug".to_string()]);
    }

    #[tokio::test]
    async fn test_sort_by_price_descending() {
        let (mut app, _) = test_app(MockApi::new(), Some("token-alice"));
        app.settle().await;

        app.dispatch(Action::SortProducts(ProductField::Price));
        app.dispatch(Action::SortProducts(ProductField::Price));

        let ids: Vec<i64> = visible_products(&app.state.read())
            .unwrap_or_default()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_out_of_range_page_keeps_current_page() {
        let (mut app, _) = test_app(MockApi::new(), Some("token-alice"));
        app.settle().await;

        app.dispatch(Action::ProductsPage(9));

        let state = app.state.read();
        assert_eq!(state.products.pagination.page(), 1);
        assert_eq!(state.notification.severity, Severity::Warning);
    }
}
