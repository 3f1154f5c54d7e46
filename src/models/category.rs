//! Category model
//!
//! Categories classify transactions and may nest through a weak `parent_id`
//! reference (no ownership, no cycle enforcement).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use crate::error::{LedgerError, LedgerResult};

static COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("^#[0-9A-Fa-f]{6}$").expect("color pattern is valid"));

/// A transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CategoryRaw")]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name (1-40 characters, non-blank)
    pub name: String,

    /// Display color as "#RRGGBB"
    pub color_hex: Option<String>,

    /// Parent category, if nested
    pub parent_id: Option<CategoryId>,
}

impl Category {
    /// Create a category with a validated name
    pub fn new(id: CategoryId, name: impl Into<String>) -> LedgerResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::validation("Category name cannot be blank"));
        }
        if name.chars().count() > 40 {
            return Err(LedgerError::validation(
                "Category name must be at most 40 characters",
            ));
        }
        Ok(Self {
            id,
            name,
            color_hex: None,
            parent_id: None,
        })
    }

    /// Attach a display color, validating the "#RRGGBB" format
    pub fn with_color(mut self, color_hex: impl Into<String>) -> LedgerResult<Self> {
        let color_hex = color_hex.into();
        if !COLOR_REGEX.is_match(&color_hex) {
            return Err(LedgerError::validation("Color must match #RRGGBB"));
        }
        self.color_hex = Some(color_hex);
        Ok(self)
    }

    /// Attach a parent category reference
    pub fn with_parent(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// The predefined starter categories backing the default rule set
    pub fn predefined() -> &'static [Category] {
        &PREDEFINED
    }
}

static PREDEFINED: Lazy<Vec<Category>> = Lazy::new(|| {
    [
        ("food", "Food"),
        ("transport", "Transport"),
        ("bills", "Bills"),
        ("shopping", "Shopping"),
        ("health", "Health"),
        ("salary", "Salary"),
    ]
    .iter()
    .map(|(id, name)| {
        let id = CategoryId::new(*id).expect("predefined id is valid");
        Category::new(id, *name).expect("predefined category is valid")
    })
    .collect()
});

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRaw {
    id: CategoryId,
    name: String,
    #[serde(default)]
    color_hex: Option<String>,
    #[serde(default)]
    parent_id: Option<CategoryId>,
}

impl TryFrom<CategoryRaw> for Category {
    type Error = LedgerError;

    fn try_from(raw: CategoryRaw) -> Result<Self, Self::Error> {
        let mut category = Category::new(raw.id, raw.name)?;
        if let Some(color) = raw.color_hex {
            category = category.with_color(color)?;
        }
        if let Some(parent) = raw.parent_id {
            category = category.with_parent(parent);
        }
        Ok(category)
    }
}
