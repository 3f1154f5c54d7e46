//! Invariant re-check rule

use super::Rule;
use crate::models::{RuleId, Transaction};

/// Re-asserts the core transaction invariants as a pipeline step
///
/// Construction and deserialization already enforce these, so a violation
/// here means a transaction was mutated out of band. The rule panics rather
/// than letting a corrupt transaction continue down the pipeline.
pub struct ValidationRule {
    id: RuleId,
}

impl ValidationRule {
    pub fn new() -> Self {
        Self {
            id: RuleId::new("validation").expect("static rule id is valid"),
        }
    }
}

impl Default for ValidationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ValidationRule {
    fn id(&self) -> &RuleId {
        &self.id
    }

    fn name(&self) -> &str {
        "Validation"
    }

    fn apply(&self, tx: Transaction) -> Transaction {
        assert!(
            !tx.description.trim().is_empty(),
            "transaction {} has a blank description",
            tx.id
        );
        assert!(
            tx.amount.is_positive(),
            "transaction {} has a non-positive amount",
            tx.id
        );
        tx
    }
}
