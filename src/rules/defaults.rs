//! Built-in merchant pattern table and default engine wiring
//!
//! Every category id in the table comes from `Category::predefined`, so
//! applying the defaults never produces a reference to an unknown category.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{AutoCategorizeRule, Rule, RuleEngine, ValidationRule};
use crate::models::CategoryId;

static DEFAULT_PATTERNS: Lazy<Vec<(Regex, CategoryId)>> = Lazy::new(|| {
    [
        (r"(?i)uber|careem", "transport"),
        (r"(?i)starbucks|cafe", "food"),
        (r"(?i)netflix|spotify", "shopping"),
        (r"(?i)rent|electric|water", "bills"),
        (r"(?i)pharmacy|clinic", "health"),
        (r"(?i)salary|payroll", "salary"),
    ]
    .into_iter()
    .map(|(pattern, category)| {
        (
            Regex::new(pattern).expect("static pattern is valid"),
            CategoryId::new(category).expect("static category id is valid"),
        )
    })
    .collect()
});

/// The built-in merchant pattern table, in match-priority order
pub fn default_patterns() -> &'static [(Regex, CategoryId)] {
    &DEFAULT_PATTERNS
}

/// The default rule set: auto-categorization with a trailing validation
/// check over the transformed transaction
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(AutoCategorizeRule::with_default_patterns()),
        Box::new(ValidationRule::new()),
    ]
}

/// An engine wired with the default rules
pub fn default_engine() -> RuleEngine {
    RuleEngine::new(default_rules())
}
