//! Price/money value type shared by `price`, `shippingCost`, `originalPrice`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative amount paired with an ISO-4217 currency code.
///
/// Constructed only through [`Money::new`], which enforces the invariants
/// from the data model: `amount >= 0` and `currency` is a 3-letter code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("currency must be a 3-letter ISO-4217 code, got {0:?}")]
    InvalidCurrency(String),
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() {
            return Err(MoneyError::NegativeAmount(amount));
        }
        let currency = currency.into();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(MoneyError::InvalidCurrency(currency));
        }
        Ok(Money {
            amount,
            currency: currency.to_ascii_uppercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn accepts_valid_money() {
        let m = Money::new(dec!(19.99), "usd").unwrap();
        assert_eq!(m.currency, "USD");
    }

    #[test]
    fn rejects_negative_amount() {
        assert_eq!(
            Money::new(dec!(-1), "USD").unwrap_err(),
            MoneyError::NegativeAmount(dec!(-1))
        );
    }

    #[test]
    fn rejects_non_three_letter_currency() {
        assert!(Money::new(dec!(1), "US").is_err());
        assert!(Money::new(dec!(1), "DOLLAR").is_err());
        assert!(Money::new(dec!(1), "U$D").is_err());
    }

    #[test]
    fn zero_amount_is_allowed() {
        assert!(Money::new(dec!(0), "USD").is_ok());
    }
}
