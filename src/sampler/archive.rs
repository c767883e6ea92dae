//! Bounded best-of archive of rule snapshots.

use crate::rule::RuleSnapshot;

/// An archived rule with the score it carried at insertion time.
#[derive(Debug, Clone)]
struct ArchiveEntry {
    snapshot: RuleSnapshot,
    score: f64,
    seq: u64,
}

/// A bounded collection of rule snapshots, ordered by descending score.
///
/// Ties are broken by a monotone insertion sequence number (earlier insert
/// first), which keeps the ordering fully deterministic across runs and
/// platforms. Inserting past capacity evicts the lowest-scored entry.
/// Membership is by rule value (antecedent + consequent), so the same rule
/// rediscovered later is rejected rather than duplicated.
#[derive(Debug, Clone)]
pub struct TopKArchive {
    entries: Vec<ArchiveEntry>,
    capacity: usize,
    next_seq: u64,
}

impl TopKArchive {
    /// Creates an empty archive holding at most `capacity` rules.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.min(1024)),
            capacity,
            next_seq: 0,
        }
    }

    /// Number of archived rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a rule with the same value is already archived.
    pub fn contains(&self, snapshot: &RuleSnapshot) -> bool {
        self.entries.iter().any(|e| &e.snapshot == snapshot)
    }

    /// Inserts a snapshot unless its rule value is already present.
    /// Returns `true` when the snapshot was stored (it may still be the one
    /// evicted if it scores lowest while the archive is full).
    pub fn insert(&mut self, snapshot: RuleSnapshot, score: f64) -> bool {
        if self.contains(&snapshot) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;

        // Descending by score; equal scores keep insertion order.
        let at = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(
            at,
            ArchiveEntry {
                snapshot,
                score,
                seq,
            },
        );
        if self.entries.len() > self.capacity {
            self.entries.pop();
        }
        true
    }

    /// Iterates over `(snapshot, score)` in descending score order.
    pub fn iter(&self) -> impl Iterator<Item = (&RuleSnapshot, f64)> {
        self.entries.iter().map(|e| (&e.snapshot, e.score))
    }

    /// Consumes the archive, yielding `(snapshot, score)` in descending
    /// score order.
    pub fn into_ranked(self) -> Vec<(RuleSnapshot, f64)> {
        self.entries
            .into_iter()
            .map(|e| (e.snapshot, e.score))
            .collect()
    }

    #[cfg(test)]
    fn sequence_of(&self, index: usize) -> u64 {
        self.entries[index].seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Alternative, DecisionRule, RuleEvaluator};
    use std::collections::BTreeSet;

    struct ConstEvaluator;

    impl RuleEvaluator for ConstEvaluator {
        fn evaluate(
            &self,
            antecedent: &BTreeSet<String>,
            _consequent: &str,
            _smoothing: f64,
            _measure_names: &[String],
        ) -> Option<Alternative> {
            Some(Alternative::new(vec![antecedent.len() as f64]))
        }
    }

    fn snapshot(items: &[&str], consequent: &str) -> RuleSnapshot {
        DecisionRule::new(
            items.iter().map(|s| s.to_string()).collect(),
            consequent,
            vec!["m".into()],
            0.0,
            &ConstEvaluator,
        )
        .snapshot()
    }

    #[test]
    fn test_eviction_keeps_k_best() {
        let mut archive = TopKArchive::new(3);
        // Strictly decreasing scores, distinct rule values.
        for (i, score) in [9.0, 7.0, 5.0, 3.0].iter().enumerate() {
            let item = format!("i{i}");
            archive.insert(snapshot(&[&item], "y"), *score);
        }

        assert_eq!(archive.len(), 3);
        let scores: Vec<f64> = archive.iter().map(|(_, s)| s).collect();
        assert_eq!(scores, vec![9.0, 7.0, 5.0]);
    }

    #[test]
    fn test_duplicate_value_rejected() {
        let mut archive = TopKArchive::new(5);
        assert!(archive.insert(snapshot(&["a"], "y"), 1.0));
        assert!(!archive.insert(snapshot(&["a"], "y"), 2.0));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_contains_is_by_value() {
        let mut archive = TopKArchive::new(5);
        archive.insert(snapshot(&["a", "b"], "y"), 1.0);
        assert!(archive.contains(&snapshot(&["b", "a"], "y")));
        assert!(!archive.contains(&snapshot(&["a"], "y")));
    }

    #[test]
    fn test_tie_break_is_insertion_order() {
        let mut archive = TopKArchive::new(5);
        archive.insert(snapshot(&["a"], "y"), 2.0);
        archive.insert(snapshot(&["b"], "y"), 2.0);
        archive.insert(snapshot(&["c"], "y"), 2.0);

        assert_eq!(archive.sequence_of(0), 0);
        assert_eq!(archive.sequence_of(1), 1);
        assert_eq!(archive.sequence_of(2), 2);
    }

    #[test]
    fn test_into_ranked_descending() {
        let mut archive = TopKArchive::new(10);
        archive.insert(snapshot(&["a"], "y"), 0.2);
        archive.insert(snapshot(&["b"], "y"), 0.9);
        archive.insert(snapshot(&["c"], "y"), 0.5);

        let ranked = archive.into_ranked();
        let scores: Vec<f64> = ranked.iter().map(|(_, s)| *s).collect();
        assert_eq!(scores, vec![0.9, 0.5, 0.2]);
    }

    #[test]
    fn test_low_score_insert_into_full_archive_is_dropped() {
        let mut archive = TopKArchive::new(2);
        archive.insert(snapshot(&["a"], "y"), 5.0);
        archive.insert(snapshot(&["b"], "y"), 4.0);
        archive.insert(snapshot(&["c"], "y"), 1.0);

        assert_eq!(archive.len(), 2);
        assert!(!archive.contains(&snapshot(&["c"], "y")));
    }
}
