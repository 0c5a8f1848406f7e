//! Rule records and item identifiers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::Result;

/// Identifier of an item appearing in an association rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One association rule: if all `antecedents` occur, `consequents` follow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Left-hand side item set.
    pub antecedents: BTreeSet<ItemId>,
    /// Right-hand side item set.
    pub consequents: BTreeSet<ItemId>,
}

impl Rule {
    /// Creates a rule from any iterables of item identifiers.
    pub fn new<A, C>(antecedents: A, consequents: C) -> Self
    where
        A: IntoIterator,
        A::Item: Into<ItemId>,
        C: IntoIterator,
        C::Item: Into<ItemId>,
    {
        Self {
            antecedents: antecedents.into_iter().map(Into::into).collect(),
            consequents: consequents.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parses a rule table exported as JSON records.
///
/// Each record needs `antecedents` and `consequents` arrays; other columns
/// such as `support` or `confidence` are ignored.
pub fn rules_from_json(input: &str) -> Result<Vec<Rule>> {
    Ok(serde_json::from_str(input)?)
}
