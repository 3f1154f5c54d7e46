//! Pattern-based auto-categorization

use regex::Regex;

use super::defaults::default_patterns;
use super::Rule;
use crate::models::{CategoryId, RuleId, Transaction};

/// Assigns a category when a description pattern matches
///
/// Patterns are checked in order and the first match wins. Transactions that
/// already carry a category pass through untouched.
pub struct AutoCategorizeRule {
    id: RuleId,
    patterns: Vec<(Regex, CategoryId)>,
}

impl AutoCategorizeRule {
    /// Build from an ordered pattern table
    pub fn new(patterns: Vec<(Regex, CategoryId)>) -> Self {
        Self {
            id: RuleId::new("auto-categorize").expect("static rule id is valid"),
            patterns,
        }
    }

    /// Build with the built-in merchant pattern table
    pub fn with_default_patterns() -> Self {
        Self::new(default_patterns().to_vec())
    }
}

impl Rule for AutoCategorizeRule {
    fn id(&self) -> &RuleId {
        &self.id
    }

    fn name(&self) -> &str {
        "Auto-categorize"
    }

    fn apply(&self, mut tx: Transaction) -> Transaction {
        if tx.category_id.is_some() {
            return tx;
        }
        for (pattern, category_id) in &self.patterns {
            if pattern.is_match(&tx.description) {
                tx.category_id = Some(category_id.clone());
                break;
            }
        }
        tx
    }
}
