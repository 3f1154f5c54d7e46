//! Currency code value type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, LedgerResult};

/// ISO-4217 style currency code: exactly 3 uppercase ASCII letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a currency code, validating the 3-uppercase-letter format
    pub fn new(value: impl Into<String>) -> LedgerResult<Self> {
        let value = value.into();
        if value.len() != 3 {
            return Err(LedgerError::validation("Currency code must be 3 characters"));
        }
        if !value.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(LedgerError::validation(
                "Currency code must be uppercase A-Z",
            ));
        }
        Ok(Self(value))
    }

    /// US dollar
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    /// Euro
    pub fn eur() -> Self {
        Self("EUR".to_string())
    }

    /// Pound sterling
    pub fn gbp() -> Self {
        Self("GBP".to_string())
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}
