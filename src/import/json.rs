//! JSON snapshot import

use std::collections::HashSet;

use super::ImportResult;
use crate::error::LedgerResult;
use crate::export::LedgerSnapshot;
use crate::models::CategoryId;

/// Parse a JSON snapshot payload
///
/// Malformed JSON and entities that fail validation are hard failures.
/// Duplicate ids within a collection keep the first occurrence, and
/// transactions pointing at categories absent from a non-empty imported
/// category set each produce a warning. Unknown JSON fields are ignored.
pub fn parse_snapshot(bytes: &[u8]) -> LedgerResult<ImportResult> {
    let snapshot: LedgerSnapshot = serde_json::from_slice(bytes)?;
    let mut result = ImportResult::default();

    let mut seen = HashSet::new();
    for category in snapshot.categories {
        if seen.insert(category.id.clone()) {
            result.categories.push(category);
        } else {
            result
                .warnings
                .push(format!("Duplicate category id '{}' ignored", category.id));
        }
    }

    let mut seen = HashSet::new();
    for budget in snapshot.budgets {
        if seen.insert(budget.id.clone()) {
            result.budgets.push(budget);
        } else {
            result
                .warnings
                .push(format!("Duplicate budget id '{}' ignored", budget.id));
        }
    }

    let mut seen = HashSet::new();
    for tx in snapshot.transactions {
        if seen.insert(tx.id.clone()) {
            result.transactions.push(tx);
        } else {
            result
                .warnings
                .push(format!("Duplicate transaction id '{}' ignored", tx.id));
        }
    }

    // Snapshots exported without categories are still importable; dangling
    // checks only make sense against a category set that was actually sent.
    if !result.categories.is_empty() {
        let known: HashSet<&CategoryId> = result.categories.iter().map(|c| &c.id).collect();
        for tx in &result.transactions {
            if let Some(category_id) = &tx.category_id {
                if !known.contains(category_id) {
                    result.warnings.push(format!(
                        "Transaction {} references missing category {}",
                        tx.id, category_id
                    ));
                }
            }
        }
    }

    Ok(result)
}
