//! Declarative transaction filter
//!
//! A `QuerySpec` is a stateless predicate: every active filter must pass for
//! a transaction to match, and an absent filter always passes. Result
//! limiting belongs to the store, which applies it only after sorting by
//! (date, id).

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{normalize_tags, CategoryId, Tags, Transaction, TransactionType};

/// Filter over transactions with inclusive date bounds
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    types: HashSet<TransactionType>,
    category_ids: HashSet<CategoryId>,
    tags_any: Tags,
    text_contains: Option<String>,
    limit: Option<usize>,
}

impl QuerySpec {
    /// A spec that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to an inclusive date range; fails if `from > to`
    pub fn date_range(
        mut self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(LedgerError::validation("from must be <= to"));
            }
        }
        self.from = from;
        self.to = to;
        Ok(self)
    }

    /// Restrict to a set of transaction types
    pub fn with_types(mut self, types: impl IntoIterator<Item = TransactionType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    /// Restrict to a set of category ids
    pub fn with_categories(mut self, category_ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.category_ids = category_ids.into_iter().collect();
        self
    }

    /// Match transactions carrying any of the given tags; tags are normalized
    /// here and invalid tags fail construction
    pub fn with_tags_any<I, S>(mut self, tags: I) -> LedgerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags_any = normalize_tags(tags)?;
        Ok(self)
    }

    /// Case-insensitive substring match on the description
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_contains = Some(text.into());
        self
    }

    /// Cap the number of results (1..=10000), applied after sorting
    pub fn with_limit(mut self, limit: usize) -> LedgerResult<Self> {
        if !(1..=10_000).contains(&limit) {
            return Err(LedgerError::validation("limit must be between 1 and 10000"));
        }
        self.limit = Some(limit);
        Ok(self)
    }

    /// The result cap, if any
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Check if a transaction satisfies every active filter
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(from) = self.from {
            if tx.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if tx.date > to {
                return false;
            }
        }
        if !self.types.is_empty() && !self.types.contains(&tx.kind) {
            return false;
        }
        if !self.category_ids.is_empty() {
            match &tx.category_id {
                Some(id) if self.category_ids.contains(id) => {}
                _ => return false,
            }
        }
        if !self.tags_any.is_empty() && tx.tags.is_disjoint(&self.tags_any) {
            return false;
        }
        if let Some(text) = &self.text_contains {
            if !text.trim().is_empty() && !tx.matches_text(text) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrencyCode, Money, TransactionId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(id: &str, on: NaiveDate) -> Transaction {
        Transaction::new(
            TransactionId::new(id).unwrap(),
            on,
            TransactionType::Expense,
            Money::of("5.00", CurrencyCode::usd()).unwrap(),
            "Morning coffee",
        )
        .unwrap()
        .with_category(CategoryId::new("food").unwrap())
        .with_tags(normalize_tags(["coffee", "morning"]).unwrap())
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        let spec = QuerySpec::new();
        assert!(spec.matches(&tx("t1", date(2024, 1, 1))));
    }

    #[test]
    fn test_date_range_inclusive() {
        let spec = QuerySpec::new()
            .date_range(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)))
            .unwrap();
        assert!(spec.matches(&tx("t1", date(2024, 1, 1))));
        assert!(spec.matches(&tx("t2", date(2024, 1, 31))));
        assert!(!spec.matches(&tx("t3", date(2024, 2, 1))));
        assert!(!spec.matches(&tx("t4", date(2023, 12, 31))));
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(QuerySpec::new()
            .date_range(Some(date(2024, 2, 1)), Some(date(2024, 1, 1)))
            .is_err());
    }

    #[test]
    fn test_type_filter() {
        let spec = QuerySpec::new().with_types([TransactionType::Income]);
        assert!(!spec.matches(&tx("t1", date(2024, 1, 1))));
    }

    #[test]
    fn test_category_filter_requires_category() {
        let spec = QuerySpec::new().with_categories([CategoryId::new("food").unwrap()]);
        assert!(spec.matches(&tx("t1", date(2024, 1, 1))));

        let mut uncategorized = tx("t2", date(2024, 1, 1));
        uncategorized.category_id = None;
        assert!(!spec.matches(&uncategorized));
    }

    #[test]
    fn test_tag_intersection() {
        let spec = QuerySpec::new().with_tags_any(["coffee", "tea"]).unwrap();
        assert!(spec.matches(&tx("t1", date(2024, 1, 1))));

        let spec = QuerySpec::new().with_tags_any(["tea"]).unwrap();
        assert!(!spec.matches(&tx("t2", date(2024, 1, 1))));
    }

    #[test]
    fn test_invalid_tags_fail_construction() {
        assert!(QuerySpec::new().with_tags_any(["not valid!"]).is_err());
    }

    #[test]
    fn test_text_filter() {
        let spec = QuerySpec::new().with_text("COFFEE");
        assert!(spec.matches(&tx("t1", date(2024, 1, 1))));

        let spec = QuerySpec::new().with_text("tea");
        assert!(!spec.matches(&tx("t2", date(2024, 1, 1))));

        // blank text filter is inert
        let spec = QuerySpec::new().with_text("   ");
        assert!(spec.matches(&tx("t3", date(2024, 1, 1))));
    }

    #[test]
    fn test_limit_bounds() {
        assert!(QuerySpec::new().with_limit(0).is_err());
        assert!(QuerySpec::new().with_limit(10_001).is_err());
        assert!(QuerySpec::new().with_limit(1).is_ok());
        assert!(QuerySpec::new().with_limit(10_000).is_ok());
    }
}
