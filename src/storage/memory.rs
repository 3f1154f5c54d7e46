//! In-memory store implementation
//!
//! All maps sit behind a single coarse mutex, so every store operation is
//! atomic with respect to every other. Intended for tests, examples, and as
//! the reference implementation of the `LedgerStore` contract.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::query::QuerySpec;
use super::{LedgerStore, SyncStatus};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, BudgetId, Category, CategoryId, Month, Transaction, TransactionId};

#[derive(Default)]
struct StoreInner {
    categories: HashMap<CategoryId, Category>,
    budgets: HashMap<BudgetId, Budget>,
    transactions: HashMap<TransactionId, Transaction>,
    statuses: HashMap<TransactionId, SyncStatus>,
}

/// Map-backed `LedgerStore` guarded by one mutex
#[derive(Default)]
pub struct InMemoryLedgerStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryLedgerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // A poisoned lock only means another caller panicked mid-operation;
        // the maps themselves are always in a consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn upsert_category(&self, category: Category) -> LedgerResult<()> {
        self.lock().categories.insert(category.id.clone(), category);
        Ok(())
    }

    fn delete_category(&self, id: &CategoryId) -> LedgerResult<()> {
        self.lock().categories.remove(id);
        Ok(())
    }

    fn get_category(&self, id: &CategoryId) -> LedgerResult<Option<Category>> {
        Ok(self.lock().categories.get(id).cloned())
    }

    fn list_categories(&self) -> LedgerResult<Vec<Category>> {
        let mut categories: Vec<Category> = self.lock().categories.values().cloned().collect();
        categories.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));
        Ok(categories)
    }

    fn upsert_budget(&self, budget: Budget) -> LedgerResult<()> {
        self.lock().budgets.insert(budget.id.clone(), budget);
        Ok(())
    }

    fn delete_budget(&self, id: &BudgetId) -> LedgerResult<()> {
        self.lock().budgets.remove(id);
        Ok(())
    }

    fn get_budget(&self, id: &BudgetId) -> LedgerResult<Option<Budget>> {
        Ok(self.lock().budgets.get(id).cloned())
    }

    fn list_budgets(&self, month: Option<Month>) -> LedgerResult<Vec<Budget>> {
        let mut budgets: Vec<Budget> = self
            .lock()
            .budgets
            .values()
            .filter(|b| month.map_or(true, |m| b.month == m))
            .cloned()
            .collect();
        budgets.sort_by(|a, b| (a.month, &a.name, &a.id).cmp(&(b.month, &b.name, &b.id)));
        Ok(budgets)
    }

    fn upsert_transaction(&self, tx: Transaction, status: SyncStatus) -> LedgerResult<()> {
        let mut inner = self.lock();
        inner.statuses.insert(tx.id.clone(), status);
        inner.transactions.insert(tx.id.clone(), tx);
        Ok(())
    }

    fn delete_transaction(&self, id: &TransactionId) -> LedgerResult<()> {
        let mut inner = self.lock();
        inner.transactions.remove(id);
        inner.statuses.remove(id);
        Ok(())
    }

    fn get_transaction(&self, id: &TransactionId) -> LedgerResult<Option<Transaction>> {
        Ok(self.lock().transactions.get(id).cloned())
    }

    fn query_transactions(&self, spec: &QuerySpec) -> LedgerResult<Vec<Transaction>> {
        let mut result: Vec<Transaction> = self
            .lock()
            .transactions
            .values()
            .filter(|tx| spec.matches(tx))
            .cloned()
            .collect();
        // limit applies only after the deterministic sort
        result.sort_by(|a, b| (a.date, &a.id).cmp(&(b.date, &b.id)));
        if let Some(limit) = spec.limit() {
            result.truncate(limit);
        }
        Ok(result)
    }

    fn get_sync_status(&self, id: &TransactionId) -> LedgerResult<Option<SyncStatus>> {
        Ok(self.lock().statuses.get(id).copied())
    }

    fn set_sync_status(&self, id: &TransactionId, status: SyncStatus) -> LedgerResult<()> {
        let mut inner = self.lock();
        if !inner.transactions.contains_key(id) {
            return Err(LedgerError::transaction_not_found(id.as_str()));
        }
        inner.statuses.insert(id.clone(), status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrencyCode, Money, TransactionType};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(id: &str, on: chrono::NaiveDate) -> Transaction {
        Transaction::new(
            TransactionId::new(id).unwrap(),
            on,
            TransactionType::Expense,
            Money::of("5.00", CurrencyCode::usd()).unwrap(),
            format!("Expense {}", id),
        )
        .unwrap()
    }

    #[test]
    fn test_category_crud() {
        let store = InMemoryLedgerStore::new();
        let id = CategoryId::new("food").unwrap();
        let category = Category::new(id.clone(), "Food").unwrap();

        store.upsert_category(category.clone()).unwrap();
        assert_eq!(store.get_category(&id).unwrap(), Some(category));

        store.delete_category(&id).unwrap();
        assert_eq!(store.get_category(&id).unwrap(), None);
    }

    #[test]
    fn test_list_categories_sorted_by_name_then_id() {
        let store = InMemoryLedgerStore::new();
        for (id, name) in [("b", "Zeta"), ("a", "Alpha"), ("c", "Alpha")] {
            store
                .upsert_category(Category::new(CategoryId::new(id).unwrap(), name).unwrap())
                .unwrap();
        }
        let listed = store.list_categories().unwrap();
        let ids: Vec<&str> = listed.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_list_budgets_month_filter_and_order() {
        let store = InMemoryLedgerStore::new();
        let cats = std::collections::BTreeSet::from([CategoryId::new("food").unwrap()]);
        for (id, name, month) in [("b2", "Feb", 2), ("b1", "Jan", 1), ("b3", "Also Jan", 1)] {
            store
                .upsert_budget(
                    Budget::new(
                        BudgetId::new(id).unwrap(),
                        name,
                        Month::new(2024, month).unwrap(),
                        Money::of("100.00", CurrencyCode::usd()).unwrap(),
                        cats.clone(),
                    )
                    .unwrap(),
                )
                .unwrap();
        }

        let all = store.list_budgets(None).unwrap();
        let ids: Vec<&str> = all.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b3", "b1", "b2"]);

        let jan = store
            .list_budgets(Some(Month::new(2024, 1).unwrap()))
            .unwrap();
        assert_eq!(jan.len(), 2);
    }

    #[test]
    fn test_query_sorts_before_limit() {
        let store = InMemoryLedgerStore::new();
        // inserted out of date order on purpose
        store
            .upsert_transaction(tx("t1", date(2024, 3, 1)), SyncStatus::LocalOnly)
            .unwrap();
        store
            .upsert_transaction(tx("t2", date(2024, 1, 1)), SyncStatus::LocalOnly)
            .unwrap();
        store
            .upsert_transaction(tx("t3", date(2024, 2, 1)), SyncStatus::LocalOnly)
            .unwrap();

        let spec = QuerySpec::new().with_limit(2).unwrap();
        let result = store.query_transactions(&spec).unwrap();
        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t3"]);
    }

    #[test]
    fn test_sync_status() {
        let store = InMemoryLedgerStore::new();
        let id = TransactionId::new("t1").unwrap();
        store
            .upsert_transaction(tx("t1", date(2024, 1, 1)), SyncStatus::LocalOnly)
            .unwrap();

        assert_eq!(
            store.get_sync_status(&id).unwrap(),
            Some(SyncStatus::LocalOnly)
        );

        store.set_sync_status(&id, SyncStatus::Synced).unwrap();
        assert_eq!(
            store.get_sync_status(&id).unwrap(),
            Some(SyncStatus::Synced)
        );

        let missing = TransactionId::new("nope").unwrap();
        let err = store
            .set_sync_status(&missing, SyncStatus::Dirty)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_upsert_replaces() {
        let store = InMemoryLedgerStore::new();
        store
            .upsert_transaction(tx("t1", date(2024, 1, 1)), SyncStatus::LocalOnly)
            .unwrap();
        store
            .upsert_transaction(tx("t1", date(2024, 2, 2)), SyncStatus::Dirty)
            .unwrap();

        let id = TransactionId::new("t1").unwrap();
        let stored = store.get_transaction(&id).unwrap().unwrap();
        assert_eq!(stored.date, date(2024, 2, 2));
        assert_eq!(store.get_sync_status(&id).unwrap(), Some(SyncStatus::Dirty));
    }
}
