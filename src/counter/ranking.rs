use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// A word and how often it occurred, detached from the table it came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankedEntry {
    pub word: String,
    pub count: u64,
}

impl RankedEntry {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.word, self.count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Total order used for ranking.
    ///
    /// Descending sorts by count high to low, then by word ascending.
    /// Ascending is the exact reverse, so the tail of one is the head of the other.
    fn compare(self, a: &RankedEntry, b: &RankedEntry) -> Ordering {
        let descending = b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word));
        match self {
            SortOrder::Descending => descending,
            SortOrder::Ascending => descending.reverse(),
        }
    }
}

/// Read-only ranking over the final counts of one run.
///
/// Keeps a single cached sorted view; asking for the same order again reuses
/// it, asking for the other order re-sorts and replaces it.
#[derive(Debug)]
pub struct RankedView {
    entries: Vec<RankedEntry>,
    cached: Option<SortOrder>,
}

impl RankedView {
    pub(crate) fn new(entries: Vec<RankedEntry>) -> Self {
        Self {
            entries,
            cached: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Order of the currently cached view, if any
    pub fn cached_order(&self) -> Option<SortOrder> {
        self.cached
    }

    /// All entries sorted by `order`
    pub fn sorted(&mut self, order: SortOrder) -> &[RankedEntry] {
        if self.cached != Some(order) {
            tracing::trace!("Sorting {} entries ({:?})", self.entries.len(), order);
            self.entries.sort_unstable_by(|a, b| order.compare(a, b));
            self.cached = Some(order);
        }
        &self.entries
    }

    /// The `n` most frequent words, most frequent first.
    ///
    /// `n` larger than the number of distinct words is clamped.
    pub fn top(&mut self, n: usize) -> Vec<RankedEntry> {
        let sorted = self.sorted(SortOrder::Descending);
        sorted[..n.min(sorted.len())].to_vec()
    }

    /// The `n` least frequent words, least frequent first.
    ///
    /// `n` larger than the number of distinct words is clamped.
    pub fn bottom(&mut self, n: usize) -> Vec<RankedEntry> {
        let sorted = self.sorted(SortOrder::Ascending);
        sorted[..n.min(sorted.len())].to_vec()
    }

    /// Plain word → count map, independent of any cached order
    pub fn to_counts(&self) -> HashMap<String, u64> {
        self.entries
            .iter()
            .map(|entry| (entry.word.clone(), entry.count))
            .collect()
    }
}
