//! Core data models
//!
//! All entities are immutable values with construction-time validation.
//! Relations between entities are reference-by-id lookups, never embedded
//! objects.

pub mod budget;
pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod month;
pub mod recurrence;
pub mod tags;
pub mod transaction;

pub use budget::Budget;
pub use category::Category;
pub use currency::CurrencyCode;
pub use ids::{BudgetId, CategoryId, RuleId, TransactionId};
pub use money::Money;
pub use month::Month;
pub use recurrence::Recurrence;
pub use tags::{normalize_tags, Tags};
pub use transaction::{Transaction, TransactionType};
