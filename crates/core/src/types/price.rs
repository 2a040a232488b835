//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the shop currency (EUR).
///
/// Wraps [`Decimal`] so prices never round-trip through floats. Serializes
/// transparently as the underlying decimal, which is how prices appear both
/// in API payloads and in the persisted cart entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The zero price.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    /// Format for display the way the shop renders prices (e.g., "19.99 €").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} €", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl std::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Decimal>().map(Self)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|p| p.0).sum())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimal_places() {
        let price = Price::new(Decimal::new(1999, 2));
        assert_eq!(price.to_string(), "19.99 €");

        let whole = Price::new(Decimal::new(5, 0));
        assert_eq!(whole.to_string(), "5.00 €");
    }

    #[test]
    fn test_sum() {
        let total: Price = [
            Price::new(Decimal::new(1999, 2)),
            Price::new(Decimal::new(501, 2)),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Price::new(Decimal::new(2500, 2)));
    }

    #[test]
    fn test_from_str() {
        let price: Price = "19.99".parse().unwrap();
        assert_eq!(price.amount(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::new(Decimal::new(1999, 2));
        let json = serde_json::to_string(&price).unwrap();
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);

        // API payloads may carry prices as bare numbers
        let from_number: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(from_number, price);
    }
}
