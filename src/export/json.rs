//! JSON snapshot export

use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::ExportResult;
use crate::error::LedgerResult;
use crate::models::{Budget, Category, CategoryId, CurrencyCode, Month, Transaction};
use crate::storage::{LedgerStore, QuerySpec};

/// Complete point-in-time view of a ledger
///
/// Collections are sorted on construction by `export_from_store`; a snapshot
/// built by hand keeps whatever order the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    /// RFC-3339 timestamp of when the snapshot was taken
    pub exported_at: String,
    /// Primary currency, taken from the first exported transaction
    #[serde(default)]
    pub currency: Option<CurrencyCode>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Serialize a snapshot to JSON bytes
pub fn export_snapshot(snapshot: &LedgerSnapshot, pretty: bool) -> LedgerResult<ExportResult> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(snapshot)?
    } else {
        serde_json::to_vec(snapshot)?
    };
    Ok(ExportResult {
        bytes,
        mime_type: "application/json",
        file_name: "ledger-snapshot.json",
    })
}

/// Build a snapshot from a store, optionally restricted to one month
///
/// A month filter narrows budgets and transactions to that month and trims
/// the category list to the categories those rows reference, plus their
/// ancestors so parent links always resolve.
pub fn export_from_store(
    store: &dyn LedgerStore,
    month: Option<Month>,
) -> LedgerResult<LedgerSnapshot> {
    let budgets = store.list_budgets(month)?;

    let spec = match month {
        Some(m) => QuerySpec::new().date_range(Some(m.first_day()), Some(m.last_day()))?,
        None => QuerySpec::new(),
    };
    let transactions = store.query_transactions(&spec)?;

    let all_categories = store.list_categories()?;
    let categories = match month {
        Some(_) => {
            let mut referenced: BTreeSet<CategoryId> = transactions
                .iter()
                .filter_map(|tx| tx.category_id.clone())
                .collect();
            for budget in &budgets {
                referenced.extend(budget.category_ids.iter().cloned());
            }
            let closed = parent_closure(referenced, &all_categories);
            all_categories
                .into_iter()
                .filter(|c| closed.contains(&c.id))
                .collect()
        }
        None => all_categories,
    };

    let currency = transactions.first().map(|tx| tx.amount.currency().clone());

    Ok(LedgerSnapshot {
        exported_at: Utc::now().to_rfc3339(),
        currency,
        categories,
        budgets,
        transactions,
    })
}

/// Expand a category id set to include every ancestor
fn parent_closure(seed: BTreeSet<CategoryId>, categories: &[Category]) -> BTreeSet<CategoryId> {
    let mut closed = BTreeSet::new();
    let mut pending: Vec<CategoryId> = seed.into_iter().collect();
    while let Some(id) = pending.pop() {
        if !closed.insert(id.clone()) {
            continue;
        }
        if let Some(parent) = categories
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.parent_id.clone())
        {
            pending.push(parent);
        }
    }
    closed
}
