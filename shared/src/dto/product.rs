use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalogue product.
///
/// `price` arrives as a decimal string (`"12.50"`) from the API; numbers are
/// accepted as well. `image_source` is computed server-side: the uploaded
/// image when present, otherwise `image_url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    /// Units in stock
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Stock as an unsigned count; negative stock reads as sold out.
    pub fn stock(&self) -> u32 {
        u32::try_from(self.quantity.max(0)).unwrap_or(u32::MAX)
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Best image reference for display
    pub fn display_image(&self) -> Option<&str> {
        self.image_source
            .as_deref()
            .or(self.image_url.as_deref())
            .or(self.image.as_deref())
    }
}

/// Image attached to a new product: either a local file to upload or a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductImage {
    /// Local file uploaded as the multipart `image` part
    File {
        file_name: String,
        bytes: Vec<u8>,
    },
    /// Remote image sent as the `image_url` field
    Url(String),
}

/// Admin "add product" form, sent as multipart (`POST /products/`).
///
/// Price and quantity are kept as entered; the server validates them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub image: Option<ProductImage>,
}
