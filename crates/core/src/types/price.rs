//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are held in the currency's standard unit (soles, not céntimos)
/// as decimals, so arithmetic on cart totals never loses cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in soles, the currency the store sells in.
    #[must_use]
    pub const fn soles(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::PEN)
    }

    /// Format for display with the currency symbol, e.g. `S/ 19.99`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {:.2}", self.currency_code.symbol(), self.amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Peruvian sol.
    #[default]
    PEN,
    USD,
}

impl CurrencyCode {
    /// Symbol used when rendering prices.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::PEN => "S/",
            Self::USD => "$",
        }
    }

    /// ISO 4217 code string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::PEN => "PEN",
            Self::USD => "USD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_two_decimals() {
        let price = Price::soles(Decimal::new(199, 1));
        assert_eq!(price.display(), "S/ 19.90");
        assert_eq!(price.to_string(), "S/ 19.90");
    }

    #[test]
    fn test_default_currency_is_pen() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::PEN);
        assert_eq!(CurrencyCode::default().symbol(), "S/");
    }
}
