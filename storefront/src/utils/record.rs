//! # Record Fields
//!
//! Uniform field access over list rows, used by [`super::sort`] and
//! [`super::search`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{Product, Transaction};
use std::fmt;
use std::str::FromStr;

/// Value of one field. Values of the same variant compare naturally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    Int(i64),
    Decimal(Decimal),
    Text(String),
    Time(DateTime<Utc>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Decimal(v) => write!(f, "{}", v),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Time(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

/// A row whose fields can be read by name.
pub trait Record {
    type Field: Copy + Eq + Ord + fmt::Debug;

    /// `None` when the field has no value for this row
    fn field(&self, field: Self::Field) -> Option<FieldValue>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductField {
    Name,
    Price,
    Quantity,
    ImageUrl,
}

impl FromStr for ProductField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(ProductField::Name),
            "price" => Ok(ProductField::Price),
            "quantity" | "stock" => Ok(ProductField::Quantity),
            "image_url" => Ok(ProductField::ImageUrl),
            other => Err(format!("Unknown product field: {}", other)),
        }
    }
}

impl Record for Product {
    type Field = ProductField;

    fn field(&self, field: ProductField) -> Option<FieldValue> {
        match field {
            ProductField::Name => Some(FieldValue::Text(self.name.clone())),
            ProductField::Price => Some(FieldValue::Decimal(self.price)),
            ProductField::Quantity => Some(FieldValue::Int(self.quantity)),
            ProductField::ImageUrl => self.image_url.clone().map(FieldValue::Text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransactionField {
    Product,
    Quantity,
    TotalAmount,
    PaymentMethod,
    Status,
    CreatedAt,
}

impl FromStr for TransactionField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "product" => Ok(TransactionField::Product),
            "quantity" => Ok(TransactionField::Quantity),
            "total_amount" | "total" => Ok(TransactionField::TotalAmount),
            "payment_method" | "payment" => Ok(TransactionField::PaymentMethod),
            "status" => Ok(TransactionField::Status),
            "created_at" | "date" => Ok(TransactionField::CreatedAt),
            other => Err(format!("Unknown transaction field: {}", other)),
        }
    }
}

impl Record for Transaction {
    type Field = TransactionField;

    fn field(&self, field: TransactionField) -> Option<FieldValue> {
        Some(match field {
            TransactionField::Product => FieldValue::Text(self.product.name.clone()),
            TransactionField::Quantity => FieldValue::Int(self.quantity),
            TransactionField::TotalAmount => FieldValue::Decimal(self.total_amount),
            TransactionField::PaymentMethod => FieldValue::Text(self.payment_method.to_string()),
            TransactionField::Status => FieldValue::Text(self.status.to_string()),
            TransactionField::CreatedAt => FieldValue::Time(self.created_at),
        })
    }
}
