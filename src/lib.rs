//! ledgerbook: a personal finance domain kernel
//!
//! Fixed-point money, validated entities, a declarative transaction query,
//! a sequential rule engine, aggregation analytics, and JSON/CSV
//! import/export, all over a pluggable storage trait. No I/O beyond byte
//! payloads; embedding applications own persistence and presentation.

pub mod analytics;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod rules;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

use export::ExportResult;
use import::ImportResult;
use models::{CurrencyCode, Month, Transaction};
use rules::Rule;
use storage::LedgerStore;

/// Crate version, from the package manifest
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a list of rules over one transaction, in order
pub fn apply_rules(tx: Transaction, rules: &[Box<dyn Rule>]) -> Transaction {
    rules.iter().fold(tx, |tx, rule| rule.apply(tx))
}

/// Expense totals by category for a month
pub fn breakdown_for_month(
    transactions: &[Transaction],
    month: Month,
    currency: &CurrencyCode,
) -> Vec<analytics::PieSlice> {
    analytics::category_breakdown(transactions, month, currency)
}

/// Net monthly totals across an inclusive month range
pub fn totals_for_range(
    transactions: &[Transaction],
    start: Month,
    end: Month,
    currency: &CurrencyCode,
) -> Vec<analytics::TimeSeriesPoint> {
    analytics::monthly_totals(transactions, start, end, currency)
}

/// Export a store as a pretty-printed JSON snapshot, optionally restricted
/// to one month
pub fn export_json(store: &dyn LedgerStore, month: Option<Month>) -> LedgerResult<ExportResult> {
    let snapshot = export::export_from_store(store, month)?;
    export::export_snapshot(&snapshot, true)
}

/// Export transactions as CSV
pub fn export_csv_transactions(transactions: &[Transaction]) -> LedgerResult<ExportResult> {
    export::export_transactions_csv(transactions)
}

/// Import a JSON snapshot payload
pub fn import_json(bytes: &[u8]) -> LedgerResult<ImportResult> {
    import::parse_snapshot(bytes)
}

/// Import a CSV transaction payload
pub fn import_csv(bytes: &[u8]) -> LedgerResult<ImportResult> {
    import::parse_transactions_csv(bytes)
}
