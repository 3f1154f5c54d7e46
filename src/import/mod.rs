//! Import pipeline
//!
//! Imports are lenient where possible: recoverable problems become warnings
//! on the `ImportResult` and the affected row or entity is skipped or
//! defaulted, while structural problems (malformed JSON, a wrong CSV header)
//! fail the whole import.

pub mod csv;
pub mod json;

pub use csv::parse_transactions_csv;
pub use json::parse_snapshot;

use crate::models::{Budget, Category, Transaction};

/// Entities accepted by an import, plus the warnings accumulated on the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    pub warnings: Vec<String>,
}
