use dashmap::DashMap;

use super::ranking::{RankedEntry, RankedView};

/// Word → occurrence count for a single run.
///
/// The map is sharded (one lock per shard) so workers counting different files
/// rarely contend, and `increment` is a single read-modify-write under the
/// shard lock, so no update is lost when two workers bump the same word.
/// There is no removal: counts only grow until the table is frozen with
/// [`FrequencyTable::into_ranked`].
#[derive(Debug, Default)]
pub struct FrequencyTable {
    counts: DashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `word` with count 1, or add 1 to its existing count.
    pub fn increment(&self, word: &str) {
        // Fast path avoids allocating the key for words already seen
        if let Some(mut count) = self.counts.get_mut(word) {
            *count += 1;
            return;
        }
        *self.counts.entry(word.to_owned()).or_insert(0) += 1;
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).map(|count| *count)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Freeze the table into a read-only ranking.
    ///
    /// Taking `self` by value guarantees every worker has released its borrow,
    /// so the ranking never observes a half-finished run.
    pub fn into_ranked(self) -> RankedView {
        let entries = self
            .counts
            .into_iter()
            .map(|(word, count)| RankedEntry { word, count })
            .collect();
        RankedView::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_increment_inserts_then_adds() {
        let table = FrequencyTable::new();
        assert!(table.is_empty());
        assert_eq!(table.get("a"), None);

        table.increment("a");
        assert_eq!(table.get("a"), Some(1));

        table.increment("a");
        table.increment("b");
        assert_eq!(table.get("a"), Some(2));
        assert_eq!(table.get("b"), Some(1));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_concurrent_increments_on_same_key_are_not_lost() {
        let table = FrequencyTable::new();
        let threads = 8;
        let per_thread = 5_000;

        thread::scope(|s| {
            for _ in 0..threads {
                s.spawn(|| {
                    for _ in 0..per_thread {
                        table.increment("shared");
                    }
                });
            }
        });

        assert_eq!(table.get("shared"), Some((threads * per_thread) as u64));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_concurrent_increments_on_distinct_keys() {
        let table = FrequencyTable::new();

        thread::scope(|s| {
            for worker in 0..4 {
                let table = &table;
                s.spawn(move || {
                    for i in 0..250 {
                        table.increment(&format!("w{}", (worker * 250 + i) % 100));
                    }
                });
            }
        });

        assert_eq!(table.len(), 100);
        assert!((0..100).all(|i| table.get(&format!("w{i}")) == Some(10)));
    }

    #[test]
    fn test_into_ranked_keeps_every_entry() {
        let table = FrequencyTable::new();
        for word in ["x", "y", "x", "z", "x", "y"] {
            table.increment(word);
        }

        let mut ranked = table.into_ranked();
        assert_eq!(ranked.len(), 3);
        let counts = ranked.to_counts();
        assert_eq!(counts["x"], 3);
        assert_eq!(counts["y"], 2);
        assert_eq!(counts["z"], 1);
        assert_eq!(ranked.top(1)[0].word, "x");
    }
}
