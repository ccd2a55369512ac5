//! # Shared Display Helpers
//!
//! Formatting used by every storefront screen.
//!
//! ## Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use shared::utils::format_price;
//!
//! assert_eq!(format_price(Decimal::new(1999, 2)), "$19.99");
//! assert_eq!(format_price(Decimal::new(5, 0)), "$5.00");
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a money amount as dollars with two decimals (`$12.50`).
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

/// Line subtotal: unit price times quantity.
pub fn line_total(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}

/// Format a timestamp for tables (`2024-03-01 10:00`).
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_price_rounds_to_cents() {
        assert_eq!(format_price(Decimal::new(12345, 3)), "$12.35");
        assert_eq!(format_price(Decimal::ZERO), "$0.00");
        assert_eq!(format_price(Decimal::new(45, 1)), "$4.50");
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(Decimal::new(250, 2), 3), Decimal::new(750, 2));
    }

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 5, 0).unwrap();
        assert_eq!(format_timestamp(&at), "2024-03-01 10:05");
    }
}
