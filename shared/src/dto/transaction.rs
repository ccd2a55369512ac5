use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::product::Product;

/// How a purchase is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    #[default]
    App,
    Cash,
}

impl PaymentMethod {
    pub fn all() -> &'static [PaymentMethod] {
        &[PaymentMethod::App, PaymentMethod::Cash]
    }

    /// Label shown next to the radio choice in the checkout dialog
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::App => "App Payment",
            PaymentMethod::Cash => "Cash Payment",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::App => "APP",
            PaymentMethod::Cash => "CASH",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "APP" => Ok(PaymentMethod::App),
            "CASH" => Ok(PaymentMethod::Cash),
            other => Err(format!("Unknown payment method: {}", other)),
        }
    }
}

/// Server-side state of a purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed (or attempted) purchase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub product: Product,
    pub quantity: i64,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

/// Purchase request (`POST /products/{id}/purchase/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub quantity: u32,
    pub payment_method: PaymentMethod,
}

/// Quantity edit (`PATCH /transactions/{id}/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTransactionRequest {
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_use_uppercase_wire_names() {
        let req = PurchaseRequest {
            quantity: 2,
            payment_method: PaymentMethod::Cash,
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"quantity":2,"payment_method":"CASH"}"#
        );
        let status: TransactionStatus = serde_json::from_str(r#""FAILED""#).unwrap();
        assert_eq!(status, TransactionStatus::Failed);
    }

    #[test]
    fn test_payment_method_from_str_is_case_insensitive() {
        assert_eq!("app".parse::<PaymentMethod>(), Ok(PaymentMethod::App));
        assert_eq!("Cash".parse::<PaymentMethod>(), Ok(PaymentMethod::Cash));
        assert!("card".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_transaction_parses_api_payload() {
        let body = r#"{
            "id": 4,
            "product": {"id": 2, "name": "Tea", "price": "3.00", "quantity": 10},
            "quantity": 2,
            "total_amount": "6.00",
            "payment_method": "APP",
            "status": "COMPLETED",
            "created_at": "2024-03-01T10:00:00Z"
        }"#;
        let tx: Transaction = serde_json::from_str(body).unwrap();
        assert_eq!(tx.product.name, "Tea");
        assert_eq!(tx.total_amount, Decimal::new(600, 2));
        assert_eq!(tx.status, TransactionStatus::Completed);
    }
}
