//! Budget model
//!
//! A budget caps spending for one calendar month across a set of categories.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::month::Month;
use crate::error::{LedgerError, LedgerResult};

/// A per-month spending cap over a set of categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "BudgetRaw")]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Budget name (1-40 characters, non-blank)
    pub name: String,

    /// The month this budget covers
    pub month: Month,

    /// Spending limit (non-negative)
    pub limit: Money,

    /// Categories the limit is distributed over (non-empty)
    pub category_ids: BTreeSet<CategoryId>,
}

impl Budget {
    /// Create a budget, validating name, limit, and category set
    pub fn new(
        id: BudgetId,
        name: impl Into<String>,
        month: Month,
        limit: Money,
        category_ids: BTreeSet<CategoryId>,
    ) -> LedgerResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::validation("Budget name cannot be blank"));
        }
        if name.chars().count() > 40 {
            return Err(LedgerError::validation(
                "Budget name must be at most 40 characters",
            ));
        }
        if limit.is_negative() {
            return Err(LedgerError::validation("Budget limit must be non-negative"));
        }
        if category_ids.is_empty() {
            return Err(LedgerError::validation(
                "Budget must target at least one category",
            ));
        }
        Ok(Self {
            id,
            name,
            month,
            limit,
            category_ids,
        })
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.month)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BudgetRaw {
    id: BudgetId,
    name: String,
    month: Month,
    limit: Money,
    category_ids: BTreeSet<CategoryId>,
}

impl TryFrom<BudgetRaw> for Budget {
    type Error = LedgerError;

    fn try_from(raw: BudgetRaw) -> Result<Self, Self::Error> {
        Budget::new(raw.id, raw.name, raw.month, raw.limit, raw.category_ids)
    }
}
