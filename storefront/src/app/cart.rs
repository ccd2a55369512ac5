//! # Cart
//!
//! In-memory list of product lines. Each line keeps the product snapshot
//! it was added with; quantities stay within `1..=stock` of that snapshot.

use rust_decimal::Decimal;
use shared::{line_total, Product};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("{0} is out of stock")]
    OutOfStock(String),

    #[error("Quantity must be between 1 and {max}")]
    InvalidQuantity { max: u32 },

    #[error("Product {0} is not in the cart")]
    NotInCart(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> Decimal {
        line_total(self.product.price, self.quantity)
    }

    pub fn can_increment(&self) -> bool {
        self.quantity < self.product.stock()
    }

    pub fn can_decrement(&self) -> bool {
        self.quantity > 1
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, product_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units across all lines (shown on the cart badge)
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Add `quantity` units. Adding a product already in the cart raises
    /// its line, capped at stock, and refreshes the snapshot.
    /// Returns the line's new quantity.
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<u32, CartError> {
        let stock = product.stock();
        if stock == 0 {
            return Err(CartError::OutOfStock(product.name));
        }
        if quantity == 0 {
            return Err(CartError::InvalidQuantity { max: stock });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity).min(stock);
            item.product = product;
            return Ok(item.quantity);
        }

        let quantity = quantity.min(stock);
        self.items.push(CartItem { product, quantity });
        Ok(quantity)
    }

    /// Set a line's quantity; rejected outside `1..=stock`.
    pub fn update_quantity(&mut self, product_id: i64, quantity: u32) -> Result<(), CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.product.id == product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        let max = item.product.stock();
        if quantity == 0 || quantity > max {
            return Err(CartError::InvalidQuantity { max });
        }
        item.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, product_id: i64) -> Option<CartItem> {
        let index = self.items.iter().position(|i| i.product.id == product_id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
