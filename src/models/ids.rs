//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. Unlike opaque UUIDs, ids are caller-supplied
//! strings validated against a shared format so they survive CSV/JSON
//! round-trips byte for byte.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};

static ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z0-9_-]{1,64}$").expect("id pattern is valid"));

fn validate_id(entity: &'static str, value: &str) -> LedgerResult<()> {
    if value.trim() != value {
        return Err(LedgerError::Validation(format!(
            "{} must not have leading/trailing whitespace",
            entity
        )));
    }
    if !ID_REGEX.is_match(value) {
        return Err(LedgerError::Validation(format!(
            "{} must match [A-Za-z0-9_-] and be 1-64 characters",
            entity
        )));
    }
    Ok(())
}

/// Macro to generate validated string ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create an ID from a string, validating the format
            pub fn new(value: impl Into<String>) -> LedgerResult<Self> {
                let value = value.into();
                validate_id($entity, &value)?;
                Ok(Self(value))
            }

            /// Create a new random ID (UUID v4 string)
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Get the ID as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = LedgerError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_id!(TransactionId, "TransactionId");
define_id!(CategoryId, "CategoryId");
define_id!(BudgetId, "BudgetId");
define_id!(RuleId, "RuleId");
