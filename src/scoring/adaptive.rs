//! Self-calibrating scoring built from archives of seen alternatives.

use std::collections::HashMap;

use crate::certainty::OutrankingCertainty;
use crate::normalize::{NormalizationMethod, Normalizer};
use crate::rule::{Alternative, DecisionRule, RuleSnapshot};
use crate::scoring::ScoringFunction;

/// Capacity of the best-archive of delegate-scored alternatives.
const BEST_CAPACITY: usize = 10;

/// Default capacity of the ranked pair-history.
const DEFAULT_MAX_PAIRS: usize = 1000;

/// Score returned when the best-archive holds nothing to compare against.
const NOVELTY_CEILING: f64 = 1.0;

#[derive(Debug, Clone)]
struct BestEntry {
    alternative: Alternative,
    score: f64,
}

#[derive(Debug, Clone)]
struct PairEntry {
    first: Alternative,
    second: Alternative,
    rank: f64,
}

/// A scoring function that calibrates itself against its own history.
///
/// Instead of a fixed formula, the score of an alternative expresses how
/// confidently it stands apart from the nearest alternative already seen:
/// `1 - certainty(alternative, nearest archived neighbor)` under the
/// injected pairwise model, where the neighbor is located by delegate score
/// inside a bounded best-archive. Alternatives indistinguishable from known
/// high-value points score 0; novel-but-comparable ones approach 1.
///
/// Every scoring call feeds the archives (best-archive, ranked
/// pair-history, alternative→rule map), so re-scoring the same alternative
/// is **not** guaranteed to return the same value. The scorer owns its own
/// [`Normalizer`], trained on every vector it sees and used only to rank
/// pairs on a comparable footing.
pub struct AdaptiveScorer<F: ScoringFunction> {
    name: String,
    base: F,
    certainty: OutrankingCertainty,
    normalizer: Normalizer,
    best: Vec<BestEntry>,
    pairs: Vec<PairEntry>,
    seen: HashMap<Alternative, RuleSnapshot>,
    max_pairs: usize,
}

impl<F: ScoringFunction> AdaptiveScorer<F> {
    /// Creates an empty scorer around a delegate scoring function and a
    /// pairwise model.
    pub fn new(base: F, certainty: OutrankingCertainty) -> Self {
        Self {
            name: format!("adaptive({})", base.name()),
            base,
            certainty,
            normalizer: Normalizer::new(),
            best: Vec::new(),
            pairs: Vec::new(),
            seen: HashMap::new(),
            max_pairs: DEFAULT_MAX_PAIRS,
        }
    }

    /// Overrides the pair-history capacity.
    pub fn with_max_pairs(mut self, max_pairs: usize) -> Self {
        self.max_pairs = max_pairs.max(1);
        self
    }

    /// Seeds the archives from already-evaluated rules without producing a
    /// score. Invalid rules are ignored.
    pub fn observe_rule(&mut self, rule: &DecisionRule) {
        if let Some(alternative) = rule.alternative().cloned() {
            self.normalizer.train(alternative.values());
            let delegate = self.base.score(&alternative);
            self.record(alternative, delegate, Some(rule));
        }
    }

    /// Number of alternatives currently held in the best-archive.
    pub fn archived(&self) -> usize {
        self.best.len()
    }

    /// Number of ranked pairs currently held.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// The `k` highest-ranked alternative pairs, resolved back to the rules
    /// they came from. Pairs whose alternatives were never tied to a rule
    /// are skipped.
    pub fn top_rule_pairs(&self, k: usize) -> Vec<(RuleSnapshot, RuleSnapshot)> {
        self.pairs
            .iter()
            .take(k)
            .filter_map(|pair| {
                let first = self.seen.get(&pair.first)?;
                let second = self.seen.get(&pair.second)?;
                Some((first.clone(), second.clone()))
            })
            .collect()
    }

    fn score_impl(&mut self, alternative: &Alternative, rule: Option<&DecisionRule>) -> f64 {
        self.normalizer.train(alternative.values());
        let delegate = self.base.score(alternative);

        let value = match self.nearest(delegate) {
            None => NOVELTY_CEILING,
            Some(idx) => {
                let neighbor = self.best[idx].alternative.clone();
                if neighbor == *alternative {
                    0.0
                } else {
                    1.0 - self
                        .certainty
                        .certainty_between(alternative, &neighbor, &mut self.base)
                }
            }
        };

        self.record(alternative.clone(), delegate, rule);
        value
    }

    /// Index of the archive entry whose delegate score is closest to
    /// `score`: the nearer of the floor/ceiling neighbors in score order,
    /// the floor on a tie.
    fn nearest(&self, score: f64) -> Option<usize> {
        if self.best.is_empty() {
            return None;
        }
        let ceiling = self.best.partition_point(|e| e.score < score);
        let floor = ceiling.checked_sub(1);
        match (floor, ceiling < self.best.len()) {
            (None, true) => Some(ceiling),
            (Some(f), false) => Some(f),
            (Some(f), true) => {
                let below = score - self.best[f].score;
                let above = self.best[ceiling].score - score;
                Some(if below <= above { f } else { ceiling })
            }
            (None, false) => None,
        }
    }

    fn record(&mut self, alternative: Alternative, delegate: f64, rule: Option<&DecisionRule>) {
        if let Some(rule) = rule {
            self.seen.insert(alternative.clone(), rule.snapshot());
        }

        // Pair the newcomer with everything already archived, ranked by
        // pairwise certainty over min-max-normalized vectors.
        let partners: Vec<Alternative> = self
            .best
            .iter()
            .filter(|e| e.alternative != alternative)
            .map(|e| e.alternative.clone())
            .collect();
        for partner in partners {
            let rank = self.pair_rank(&alternative, &partner);
            let at = self.pairs.partition_point(|p| p.rank > rank);
            self.pairs.insert(
                at,
                PairEntry {
                    first: alternative.clone(),
                    second: partner,
                    rank,
                },
            );
            if self.pairs.len() > self.max_pairs {
                self.pairs.pop();
            }
        }

        // Best-archive, ascending by delegate score. On overflow the lowest
        // entry goes, keeping the archive a genuine best-of collection.
        let at = self.best.partition_point(|e| e.score < delegate);
        self.best.insert(
            at,
            BestEntry {
                alternative,
                score: delegate,
            },
        );
        if self.best.len() > BEST_CAPACITY {
            self.best.remove(0);
        }
    }

    fn pair_rank(&mut self, a: &Alternative, b: &Alternative) -> f64 {
        let na = Alternative::new(self.normalizer.apply(a.values(), NormalizationMethod::MinMax));
        let nb = Alternative::new(self.normalizer.apply(b.values(), NormalizationMethod::MinMax));
        self.certainty.certainty_between(&na, &nb, &mut self.base)
    }
}

impl<F: ScoringFunction> ScoringFunction for AdaptiveScorer<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&mut self, alternative: &Alternative) -> f64 {
        self.score_impl(alternative, None)
    }

    fn score_rule(&mut self, alternative: &Alternative, rule: &DecisionRule) -> f64 {
        self.score_impl(alternative, Some(rule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleEvaluator;
    use crate::scoring::WeightedSum;
    use std::collections::BTreeSet;

    // Evaluator that hands back a fixed two-dimensional point per
    // consequent, enough to build distinct valid rules.
    struct PointEvaluator;

    impl RuleEvaluator for PointEvaluator {
        fn evaluate(
            &self,
            antecedent: &BTreeSet<String>,
            consequent: &str,
            _smoothing: f64,
            _measure_names: &[String],
        ) -> Option<Alternative> {
            let x = antecedent.len() as f64;
            let y: f64 = consequent.len() as f64;
            Some(Alternative::new(vec![x / (x + 1.0), y / (y + 1.0)]))
        }
    }

    fn scorer() -> AdaptiveScorer<WeightedSum> {
        AdaptiveScorer::new(
            WeightedSum::new(vec![1.0, 1.0]),
            OutrankingCertainty::BradleyTerry { scale: 1.0 },
        )
    }

    fn rule(items: &[&str], consequent: &str) -> DecisionRule {
        DecisionRule::new(
            items.iter().map(|s| s.to_string()).collect(),
            consequent,
            vec!["m0".into(), "m1".into()],
            1e-6,
            &PointEvaluator,
        )
    }

    #[test]
    fn test_empty_archive_scores_max_novelty() {
        let mut s = scorer();
        let v = Alternative::new(vec![0.5, 0.5]);
        assert_eq!(s.score(&v), NOVELTY_CEILING);
        // The call itself archived the alternative.
        assert_eq!(s.archived(), 1);
    }

    #[test]
    fn test_identical_neighbor_scores_zero() {
        let mut s = scorer();
        let r = rule(&["a"], "y1");
        s.observe_rule(&r);

        let v = r.alternative().unwrap().clone();
        assert_eq!(s.score(&v), 0.0);
    }

    #[test]
    fn test_rescoring_is_not_idempotent() {
        let mut s = scorer();
        s.observe_rule(&rule(&["a"], "y1"));

        let v = Alternative::new(vec![0.9, 0.1]);
        let first = s.score(&v);
        // After the first call `v` is archived, so its nearest neighbor is
        // now itself and the score collapses to 0.
        let second = s.score(&v);
        assert!(first > 0.0);
        assert_eq!(second, 0.0);
    }

    #[test]
    fn test_best_archive_bounded_keeps_highest() {
        let mut s = scorer();
        for i in 0..25 {
            let v = Alternative::new(vec![i as f64, 0.0]);
            let _ = s.score(&v);
        }
        assert_eq!(s.archived(), BEST_CAPACITY);
        // Entries are ascending by delegate score; the lowest survivor must
        // come from the high end of the inserted range.
        assert!(s.best[0].score >= 15.0 - 1e-12);
    }

    #[test]
    fn test_pair_history_bounded() {
        let mut s = scorer().with_max_pairs(5);
        for i in 0..10 {
            let v = Alternative::new(vec![i as f64, 1.0]);
            let _ = s.score(&v);
        }
        assert!(s.pair_count() <= 5);
        // Ranks stay sorted descending.
        for w in s.pairs.windows(2) {
            assert!(w[0].rank >= w[1].rank);
        }
    }

    #[test]
    fn test_top_rule_pairs_resolves_rules() {
        let mut s = scorer();
        let r1 = rule(&["a"], "y1");
        let r2 = rule(&["a", "b"], "y22");
        s.observe_rule(&r1);
        s.observe_rule(&r2);

        let pairs = s.top_rule_pairs(10);
        assert!(!pairs.is_empty());
        for (first, second) in &pairs {
            assert_ne!(first.alternative(), second.alternative());
        }
    }

    #[test]
    fn test_score_between_known_points_in_unit_interval() {
        let mut s = scorer();
        s.observe_rule(&rule(&["a"], "y1"));
        s.observe_rule(&rule(&["a", "b", "c"], "y222"));

        let v = Alternative::new(vec![0.5, 0.55]);
        let score = s.score(&v);
        assert!((0.0..=1.0).contains(&score));
    }
}
