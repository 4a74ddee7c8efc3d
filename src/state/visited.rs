use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of visited keys already processed by the link extractor
///
/// The set only grows. There is deliberately no removal API; resetting a crawl
/// means deleting the persisted store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitedSet {
    keys: BTreeSet<String>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key has been visited
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Marks a key as visited
    ///
    /// Returns true if the key was not present before.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    /// Number of visited keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if nothing has been visited yet
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates over visited keys in lexical order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for VisitedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
