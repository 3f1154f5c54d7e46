//! Transaction model
//!
//! A recorded financial event. The stored amount is always positive; polarity
//! is derived from the transaction type via `signed_amount`, so aggregation
//! can sum signed values without branching on type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;
use super::recurrence::Recurrence;
use super::tags::{normalize_tags, Tags};
use crate::error::{LedgerError, LedgerResult};

/// Classification for transaction polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "INCOME"),
            Self::Expense => write!(f, "EXPENSE"),
            Self::Transfer => write!(f, "TRANSFER"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            "TRANSFER" => Ok(Self::Transfer),
            other => Err(LedgerError::Validation(format!(
                "Unknown transaction type '{}'",
                other
            ))),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TransactionRaw")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Polarity classification
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Amount, always positive; sign is derived from `kind`
    pub amount: Money,

    /// Description (1-120 characters, no surrounding whitespace)
    pub description: String,

    /// Category reference, if categorized
    pub category_id: Option<CategoryId>,

    /// Normalized tag set
    pub tags: Tags,

    /// Recurrence schedule
    pub recurrence: Recurrence,
}

impl Transaction {
    /// Create a transaction, validating description and amount
    pub fn new(
        id: TransactionId,
        date: NaiveDate,
        kind: TransactionType,
        amount: Money,
        description: impl Into<String>,
    ) -> LedgerResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(LedgerError::validation("Description cannot be blank"));
        }
        if description.chars().count() > 120 {
            return Err(LedgerError::validation(
                "Description must be at most 120 characters",
            ));
        }
        if description.trim() != description {
            return Err(LedgerError::validation(
                "Description cannot have leading/trailing whitespace",
            ));
        }
        if !amount.is_positive() {
            return Err(LedgerError::validation(
                "Transaction amount must be positive",
            ));
        }
        Ok(Self {
            id,
            date,
            kind,
            amount,
            description,
            category_id: None,
            tags: Tags::new(),
            recurrence: Recurrence::None,
        })
    }

    /// Attach a category
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Attach an already-normalized tag set
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Attach a recurrence schedule
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Amount with sign applied per type: expenses negative, income and
    /// transfers positive
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Expense => -self.amount.clone(),
            TransactionType::Income | TransactionType::Transfer => self.amount.clone(),
        }
    }

    /// Case-insensitive substring match against the description
    pub fn matches_text(&self, query: &str) -> bool {
        let needle = query.trim();
        if needle.is_empty() {
            return false;
        }
        self.description
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRaw {
    id: TransactionId,
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TransactionType,
    amount: Money,
    description: String,
    #[serde(default)]
    category_id: Option<CategoryId>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    recurrence: Recurrence,
}

impl TryFrom<TransactionRaw> for Transaction {
    type Error = LedgerError;

    fn try_from(raw: TransactionRaw) -> Result<Self, Self::Error> {
        let mut tx = Transaction::new(raw.id, raw.date, raw.kind, raw.amount, raw.description)?
            .with_tags(normalize_tags(&raw.tags)?)
            .with_recurrence(raw.recurrence);
        tx.category_id = raw.category_id;
        Ok(tx)
    }
}
