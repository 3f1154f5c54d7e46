//! Storage layer
//!
//! The `LedgerStore` trait is the persistence seam consumed by export and by
//! callers; implementations may be in-memory or external. Every operation is
//! atomic with respect to every other.

pub mod memory;
pub mod query;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LedgerResult;
use crate::models::{Budget, BudgetId, Category, CategoryId, Month, Transaction, TransactionId};
pub use memory::InMemoryLedgerStore;
pub use query::QuerySpec;

/// Reconciliation state of a transaction against an external system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncStatus {
    /// Exists locally and has not been synced
    LocalOnly,
    /// Confirmed by the remote
    Synced,
    /// Local changes pending after a sync
    Dirty,
    /// Requires manual resolution
    Conflict,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalOnly => write!(f, "LOCAL_ONLY"),
            Self::Synced => write!(f, "SYNCED"),
            Self::Dirty => write!(f, "DIRTY"),
            Self::Conflict => write!(f, "CONFLICT"),
        }
    }
}

/// Abstraction for ledger persistence
pub trait LedgerStore: Send + Sync {
    /// Insert or update a category
    fn upsert_category(&self, category: Category) -> LedgerResult<()>;

    /// Delete a category by id
    fn delete_category(&self, id: &CategoryId) -> LedgerResult<()>;

    /// Fetch a category, if present
    fn get_category(&self, id: &CategoryId) -> LedgerResult<Option<Category>>;

    /// List all categories, sorted by (name, id)
    fn list_categories(&self) -> LedgerResult<Vec<Category>>;

    /// Insert or update a budget
    fn upsert_budget(&self, budget: Budget) -> LedgerResult<()>;

    /// Delete a budget by id
    fn delete_budget(&self, id: &BudgetId) -> LedgerResult<()>;

    /// Fetch a budget, if present
    fn get_budget(&self, id: &BudgetId) -> LedgerResult<Option<Budget>>;

    /// List budgets, optionally filtered by month, sorted by (month, name, id)
    fn list_budgets(&self, month: Option<Month>) -> LedgerResult<Vec<Budget>>;

    /// Insert or update a transaction along with its sync status
    fn upsert_transaction(&self, tx: Transaction, status: SyncStatus) -> LedgerResult<()>;

    /// Delete a transaction by id
    fn delete_transaction(&self, id: &TransactionId) -> LedgerResult<()>;

    /// Fetch a transaction, if present
    fn get_transaction(&self, id: &TransactionId) -> LedgerResult<Option<Transaction>>;

    /// Run a filtered query: filter, sort by (date, id), then apply the limit
    fn query_transactions(&self, spec: &QuerySpec) -> LedgerResult<Vec<Transaction>>;

    /// Get a transaction's sync status, if the transaction exists
    fn get_sync_status(&self, id: &TransactionId) -> LedgerResult<Option<SyncStatus>>;

    /// Set a transaction's sync status; fails if the transaction does not exist
    fn set_sync_status(&self, id: &TransactionId, status: SyncStatus) -> LedgerResult<()>;
}
