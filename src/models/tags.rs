//! Tag normalization
//!
//! Tags are stored as a sorted set of lowercase strings. Normalization trims,
//! lowercases, drops empties, and de-duplicates before validating; a single
//! invalid tag fails the whole set (no partial acceptance).

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::error::{LedgerError, LedgerResult};

/// Normalized set of lowercase tags
pub type Tags = BTreeSet<String>;

static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[a-z0-9_-]{1,24}$").expect("tag pattern is valid"));

/// Trims, lowercases, de-duplicates, and validates tags
pub fn normalize_tags<I, S>(input: I) -> LedgerResult<Tags>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags = Tags::new();
    for raw in input {
        let tag = raw.as_ref().trim().to_lowercase();
        if tag.is_empty() {
            continue;
        }
        if !TAG_REGEX.is_match(&tag) {
            return Err(LedgerError::Validation(format!("Invalid tag '{}'", tag)));
        }
        tags.insert(tag);
    }
    Ok(tags)
}
