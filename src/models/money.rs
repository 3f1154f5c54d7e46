//! Money type for representing currency amounts
//!
//! Internally stores amounts as fixed-point decimals with scale pinned to 2,
//! rounded half-up at construction and after every operation. Pinning the
//! scale keeps CSV/JSON round-trips byte-stable and prevents silent drift.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use super::currency::CurrencyCode;
use crate::error::{LedgerError, LedgerResult};

static AMOUNT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("amount pattern is valid"));

/// Rounds a decimal to exactly 2 fractional digits, half-up
fn normalize(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// A monetary amount in a specific currency, always at scale 2
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Money {
    amount: Decimal,
    currency: CurrencyCode,
}

impl Money {
    /// Parse a money amount from a string (optional sign, digits, optional
    /// fraction), rounding half-up to 2 decimals
    pub fn of(raw: &str, currency: CurrencyCode) -> LedgerResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !AMOUNT_REGEX.is_match(trimmed) {
            return Err(LedgerError::InvalidAmount(raw.to_string()));
        }
        let amount = Decimal::from_str(trimmed)
            .map_err(|_| LedgerError::InvalidAmount(raw.to_string()))?;
        Ok(Self::from_decimal(amount, currency))
    }

    /// Create a money amount from a decimal, rounding half-up to 2 decimals
    pub fn from_decimal(amount: Decimal, currency: CurrencyCode) -> Self {
        Self {
            amount: normalize(amount),
            currency,
        }
    }

    /// Zero amount in a currency
    pub fn zero(currency: CurrencyCode) -> Self {
        Self::from_decimal(Decimal::ZERO, currency)
    }

    /// Get the amount (scale 2)
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Get the currency
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Add two amounts of the same currency
    pub fn plus(&self, other: &Money) -> LedgerResult<Money> {
        self.ensure_same_currency(other)?;
        Ok(Self {
            amount: normalize(self.amount + other.amount),
            currency: self.currency.clone(),
        })
    }

    /// Subtract two amounts of the same currency
    pub fn minus(&self, other: &Money) -> LedgerResult<Money> {
        self.ensure_same_currency(other)?;
        Ok(Self {
            amount: normalize(self.amount - other.amount),
            currency: self.currency.clone(),
        })
    }

    /// Multiply by an integer, preserving currency
    pub fn times(&self, multiplier: i64) -> Money {
        Self {
            amount: normalize(self.amount * Decimal::from(multiplier)),
            currency: self.currency.clone(),
        }
    }

    /// Multiply by a decimal, rounding half-up to 2 decimals
    pub fn times_decimal(&self, multiplier: Decimal) -> Money {
        Self {
            amount: normalize(self.amount * multiplier),
            currency: self.currency.clone(),
        }
    }

    /// Divide by an integer using half-up rounding
    pub fn div(&self, divisor: i64) -> LedgerResult<Money> {
        if divisor == 0 {
            return Err(LedgerError::DivisionByZero);
        }
        Ok(Self {
            amount: normalize(self.amount / Decimal::from(divisor)),
            currency: self.currency.clone(),
        })
    }

    /// Absolute value
    pub fn abs(&self) -> Money {
        Self {
            amount: self.amount.abs(),
            currency: self.currency.clone(),
        }
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Check if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Total order within a currency; comparing across currencies fails
    pub fn compare(&self, other: &Money) -> LedgerResult<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    fn ensure_same_currency(&self, other: &Money) -> LedgerResult<()> {
        if self.currency != other.currency {
            return Err(LedgerError::CurrencyMismatch {
                left: self.currency.to_string(),
                right: other.currency.to_string(),
            });
        }
        Ok(())
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money {
            amount: -self.amount,
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[derive(Serialize, Deserialize)]
struct MoneyRepr {
    amount: String,
    currency: String,
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MoneyRepr {
            amount: self.amount.to_string(),
            currency: self.currency.to_string(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = MoneyRepr::deserialize(deserializer)?;
        let currency = CurrencyCode::new(repr.currency).map_err(de::Error::custom)?;
        Money::of(&repr.amount, currency).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(raw: &str) -> Money {
        Money::of(raw, CurrencyCode::usd()).unwrap()
    }

    #[test]
    fn test_of_normalizes_scale() {
        assert_eq!(usd("10").amount().to_string(), "10.00");
        assert_eq!(usd("10.5").amount().to_string(), "10.50");
        assert_eq!(usd("10.505").amount().to_string(), "10.51");
        assert_eq!(usd("-10.505").amount().to_string(), "-10.51");
        assert_eq!(usd("10.004").amount().to_string(), "10.00");
    }

    #[test]
    fn test_of_rejects_bad_input() {
        let c = CurrencyCode::usd();
        assert!(Money::of("", c.clone()).is_err());
        assert!(Money::of("abc", c.clone()).is_err());
        assert!(Money::of("10.", c.clone()).is_err());
        assert!(Money::of("$10", c.clone()).is_err());
        assert!(Money::of("1,000", c).is_err());
    }

    #[test]
    fn test_plus_minus_exact() {
        let a = usd("10.10");
        let b = usd("0.25");
        assert_eq!(a.plus(&b).unwrap(), usd("10.35"));
        assert_eq!(a.minus(&b).unwrap(), usd("9.85"));
    }

    #[test]
    fn test_currency_mismatch() {
        let a = usd("1.00");
        let b = Money::of("1.00", CurrencyCode::eur()).unwrap();
        assert!(matches!(
            a.plus(&b),
            Err(LedgerError::CurrencyMismatch { .. })
        ));
        assert!(a.minus(&b).is_err());
        assert!(a.compare(&b).is_err());
    }

    #[test]
    fn test_times_rounds_half_up() {
        let a = usd("10.05");
        assert_eq!(a.times(3), usd("30.15"));
        assert_eq!(
            a.times_decimal(Decimal::from_str("0.333").unwrap()),
            usd("3.35") // 3.34665 rounds up
        );
    }

    #[test]
    fn test_div() {
        let a = usd("10.00");
        assert_eq!(a.div(3).unwrap(), usd("3.33"));
        assert_eq!(usd("10.01").div(2).unwrap(), usd("5.01")); // 5.005 half-up
        assert!(matches!(a.div(0), Err(LedgerError::DivisionByZero)));
    }

    #[test]
    fn test_abs_and_neg() {
        let a = usd("5.00");
        assert_eq!((-a.clone()).abs(), a);
        assert!((-usd("5.00")).is_negative());
        assert!(usd("0.00").is_zero());
    }

    #[test]
    fn test_compare() {
        assert_eq!(usd("2.00").compare(&usd("1.00")).unwrap(), Ordering::Greater);
        assert_eq!(usd("1.00").compare(&usd("1.00")).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_serialization() {
        let m = usd("12.00");
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"amount":"12.00","currency":"USD"}"#);

        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);

        let bad: Result<Money, _> = serde_json::from_str(r#"{"amount":"x","currency":"USD"}"#);
        assert!(bad.is_err());
    }
}
