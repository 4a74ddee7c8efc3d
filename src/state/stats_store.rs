use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cumulative token counts in first-seen order
///
/// Iteration order is the order in which each token was first counted, which
/// makes [`WordFrequency::top`] break ties by first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordFrequency {
    counts: IndexMap<String, u64>,
}

impl WordFrequency {
    /// Creates an empty frequency map
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `word`, starting from zero for new words
    pub fn add(&mut self, word: &str, count: u64) {
        match self.counts.get_mut(word) {
            Some(existing) => *existing += count,
            None => {
                self.counts.insert(word.to_string(), count);
            }
        }
    }

    /// Returns the count for `word`, zero if it was never seen
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Adds every count from `other` into this map
    ///
    /// Words already present keep their position; new words are appended in
    /// `other`'s order.
    pub fn merge(&mut self, other: &WordFrequency) {
        for (word, count) in &other.counts {
            self.add(word, *count);
        }
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no word has been counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(word, count)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// Returns the `n` most frequent words, highest count first
    ///
    /// The sort is stable, so equal counts stay in first-seen order.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for WordFrequency {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut frequency = Self::new();
        for (word, count) in iter {
            let word: String = word.into();
            frequency.add(&word, count);
        }
        frequency
    }
}

/// The page with the most counted words seen so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongestPage {
    /// URL the page was requested under
    pub url: String,

    /// Counted words on that page
    pub word_count: u64,
}

/// Cumulative statistics across every recorded page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsStore {
    /// Pages recorded per `scheme://host`
    #[serde(default)]
    pub subdomain_counts: BTreeMap<String, u64>,

    /// Counted words across all pages
    #[serde(default)]
    pub word_frequency: WordFrequency,

    /// Longest page so far, if any page had counted words
    #[serde(default)]
    pub longest_page: Option<LongestPage>,
}

impl StatsStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more page for the given subdomain key
    pub fn record_subdomain(&mut self, subdomain: &str) {
        *self
            .subdomain_counts
            .entry(subdomain.to_string())
            .or_insert(0) += 1;
    }

    /// Replaces the longest page if `word_count` beats the stored one
    ///
    /// URL and count are swapped in as one value. Ties keep the earlier page.
    /// Returns true if the page became the new longest page.
    pub fn offer_longest_page(&mut self, url: &str, word_count: u64) -> bool {
        let current = self.longest_page.as_ref().map(|p| p.word_count).unwrap_or(0);
        if word_count <= current {
            return false;
        }

        self.longest_page = Some(LongestPage {
            url: url.to_string(),
            word_count,
        });
        true
    }

    /// Total pages recorded across all subdomains
    pub fn pages_recorded(&self) -> u64 {
        self.subdomain_counts.values().sum()
    }
}
