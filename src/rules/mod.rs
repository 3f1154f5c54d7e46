//! Transaction rule engine
//!
//! Rules are pure transformations applied strictly in registration order.
//! A rule never fails; it either changes the transaction or returns it
//! untouched.

pub mod auto_categorize;
pub mod defaults;
pub mod validation;

use crate::models::{RuleId, Transaction};

pub use auto_categorize::AutoCategorizeRule;
pub use defaults::{default_engine, default_patterns, default_rules};
pub use validation::ValidationRule;

/// A single transformation step over a transaction
pub trait Rule: Send + Sync {
    /// Stable identifier for the rule
    fn id(&self) -> &RuleId;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Transform the transaction; returns it unchanged when the rule does
    /// not apply
    fn apply(&self, tx: Transaction) -> Transaction;
}

/// Runs an ordered list of rules over transactions
#[derive(Default)]
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Build an engine that applies the given rules in order
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Apply every rule to one transaction, in order
    pub fn process(&self, tx: Transaction) -> Transaction {
        self.rules.iter().fold(tx, |tx, rule| rule.apply(tx))
    }

    /// Apply every rule to each transaction in the list
    pub fn apply_all(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions
            .into_iter()
            .map(|tx| self.process(tx))
            .collect()
    }
}
