//! Party module - canonical participant names

use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant in the matter, in its canonical display form
///
/// Two parties are the same party when their [`Party::dedup_key`]s are equal;
/// the canonical form is whichever casing was seen first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Party(String);

impl Party {
    /// Create a party, collapsing internal whitespace
    ///
    /// # Examples
    ///
    /// ```
    /// use docket_domain::Party;
    ///
    /// let party = Party::new("  Hunter \n Warfield ");
    /// assert_eq!(party.name(), "Hunter Warfield");
    /// ```
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(collapse_whitespace(name.as_ref()))
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Case-folded, whitespace-collapsed identity key
    pub fn dedup_key(&self) -> String {
        Self::key_for(&self.0)
    }

    /// Identity key for an arbitrary mention
    pub fn key_for(text: &str) -> String {
        collapse_whitespace(text).to_lowercase()
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Party {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trim and collapse every run of whitespace (newlines included) to one space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
