//! Currency reference rates and asset conversion.

use serde::Serialize;

/// Units of `quote` per one unit of `base`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRate {
    pub base: String,
    pub quote: String,
    pub rate: f64,
}

impl ExchangeRate {
    #[must_use]
    pub fn apply(&self, amount: f64) -> f64 {
        amount * self.rate
    }
}

/// Result of converting an amount of one asset into another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub rate: f64,
    pub converted: f64,
}

impl Conversion {
    /// Build a conversion from both assets' prices in a common currency.
    ///
    /// Returns `None` when the target price is zero or either price is not finite.
    #[must_use]
    pub fn from_prices(
        from: impl Into<String>,
        to: impl Into<String>,
        amount: f64,
        from_price: f64,
        to_price: f64,
    ) -> Option<Self> {
        if !from_price.is_finite() || !to_price.is_finite() || to_price == 0.0 {
            return None;
        }
        let rate = from_price / to_price;
        Some(Self {
            from: from.into(),
            to: to.into(),
            amount,
            rate,
            converted: amount * rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_uses_price_ratio() {
        let c = Conversion::from_prices("bitcoin", "ethereum", 2.0, 60_000.0, 3_000.0).unwrap();
        assert_eq!(c.rate, 20.0);
        assert_eq!(c.converted, 40.0);
    }

    #[test]
    fn conversion_rejects_zero_target_price() {
        assert!(Conversion::from_prices("a", "b", 1.0, 10.0, 0.0).is_none());
        assert!(Conversion::from_prices("a", "b", 1.0, f64::NAN, 1.0).is_none());
    }
}
