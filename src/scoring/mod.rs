//! Scalar scoring of alternatives.
//!
//! The sampler ranks rules through a single scalar; this module defines the
//! scoring contract plus two fixed aggregates, and [`AdaptiveScorer`], a
//! self-calibrating implementation that learns from its own scoring history.

mod adaptive;

pub use adaptive::AdaptiveScorer;

use crate::rule::{Alternative, DecisionRule};

/// Scores an alternative as a single scalar, higher is better.
///
/// Takes `&mut self` because implementations are allowed to learn from what
/// they score: [`AdaptiveScorer`] mutates internal archives on every call
/// and is deliberately non-idempotent. Fixed aggregates simply ignore the
/// mutability.
pub trait ScoringFunction {
    /// Returns a human-readable name for this scoring function.
    fn name(&self) -> &str;

    /// Scores a bare alternative.
    fn score(&mut self, alternative: &Alternative) -> f64;

    /// Scores an alternative that came from a known rule.
    ///
    /// The default just delegates to [`ScoringFunction::score`]; learning
    /// implementations override this to record which rule produced the
    /// alternative.
    fn score_rule(&mut self, alternative: &Alternative, rule: &DecisionRule) -> f64 {
        let _ = rule;
        self.score(alternative)
    }
}

/// Weighted linear aggregate: `sum(w_i * x_i)` over the shorter of the two
/// lengths.
#[derive(Debug, Clone)]
pub struct WeightedSum {
    weights: Vec<f64>,
}

impl WeightedSum {
    /// Creates a weighted-sum scorer with the given per-dimension weights.
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// Uniform weights `1/n` over `n` dimensions.
    pub fn uniform(dimensions: usize) -> Self {
        let w = 1.0 / dimensions.max(1) as f64;
        Self {
            weights: vec![w; dimensions],
        }
    }
}

impl ScoringFunction for WeightedSum {
    fn name(&self) -> &str {
        "weighted-sum"
    }

    fn score(&mut self, alternative: &Alternative) -> f64 {
        self.weights
            .iter()
            .zip(alternative.values())
            .map(|(w, x)| w * x)
            .sum()
    }
}

/// Worst-case aggregate: the minimum over all dimensions, 0 for an empty
/// vector. A cheap stand-in for lexmin-style egalitarian aggregation, which
/// rewards rules with no weak measure.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstMeasure;

impl ScoringFunction for WorstMeasure {
    fn name(&self) -> &str {
        "worst-measure"
    }

    fn score(&mut self, alternative: &Alternative) -> f64 {
        let worst = alternative
            .values()
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        if worst.is_finite() {
            worst
        } else {
            0.0
        }
    }
}
