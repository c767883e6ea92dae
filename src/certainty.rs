//! Pairwise outranking acceptance models.
//!
//! Given the scalar scores of a candidate and a baseline alternative, an
//! outranking model returns the probability that the candidate should
//! replace the baseline. The three variants share the same contract and
//! differ only in the shape of the link function, i.e. in how sharply the
//! acceptance probability reacts to a score gap — swapping variants never
//! changes the search's control flow.
//!
//! # References
//!
//! - Thurstone (1927), "A law of comparative judgment"
//! - Bradley & Terry (1952), "Rank analysis of incomplete block designs"

use crate::rule::Alternative;
use crate::scoring::ScoringFunction;
use statrs::function::erf::erf;
use std::f64::consts::SQRT_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pairwise acceptance-probability model.
///
/// `certainty(c, b)` is non-decreasing in `c - b`, bounded in `[0, 1]`, and
/// equals the neutral value `0.5` when both scores coincide. The `scale`
/// field stretches the score gap before the link is applied: larger scales
/// flatten the acceptance curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutrankingCertainty {
    /// Probit link: normal CDF of the scaled gap.
    Thurstone {
        /// Gap divisor, must be positive.
        scale: f64,
    },

    /// Logistic link: sigmoid of the scaled gap.
    BradleyTerry {
        /// Gap divisor, must be positive.
        scale: f64,
    },

    /// Clamped affine link: `0.5 + gap / (2 * scale)`, clamped to `[0, 1]`.
    /// Fully linear between `baseline - scale` and `baseline + scale`.
    ScoreDifference {
        /// Half-width of the linear region, must be positive.
        scale: f64,
    },
}

impl Default for OutrankingCertainty {
    fn default() -> Self {
        OutrankingCertainty::BradleyTerry { scale: 1.0 }
    }
}

impl OutrankingCertainty {
    /// Probability of accepting `candidate` over `baseline`.
    pub fn certainty(&self, candidate: f64, baseline: f64) -> f64 {
        let gap = candidate - baseline;
        match *self {
            OutrankingCertainty::Thurstone { scale } => normal_cdf(gap / scale),
            OutrankingCertainty::BradleyTerry { scale } => 1.0 / (1.0 + (-gap / scale).exp()),
            OutrankingCertainty::ScoreDifference { scale } => {
                (0.5 + gap / (2.0 * scale)).clamp(0.0, 1.0)
            }
        }
    }

    /// Acceptance probability for a pair of alternatives: both sides are
    /// scored with `scoring`, then the link is applied to the scalar pair.
    pub fn certainty_between<S: ScoringFunction>(
        &self,
        candidate: &Alternative,
        baseline: &Alternative,
        scoring: &mut S,
    ) -> f64 {
        let c = scoring.score(candidate);
        let b = scoring.score(baseline);
        self.certainty(c, b)
    }

    /// The value returned at `certainty(s, s)`, for every variant.
    pub fn neutral(&self) -> f64 {
        0.5
    }
}

/// Standard normal CDF.
fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / SQRT_2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::WeightedSum;

    fn variants() -> [OutrankingCertainty; 3] {
        [
            OutrankingCertainty::Thurstone { scale: 1.0 },
            OutrankingCertainty::BradleyTerry { scale: 1.0 },
            OutrankingCertainty::ScoreDifference { scale: 1.0 },
        ]
    }

    #[test]
    fn test_neutral_at_equal_scores() {
        for model in variants() {
            for s in [-3.0, 0.0, 0.7, 42.0] {
                let p = model.certainty(s, s);
                assert!(
                    (p - model.neutral()).abs() < 1e-12,
                    "{model:?} not neutral at {s}: {p}"
                );
            }
        }
    }

    #[test]
    fn test_monotone_in_gap() {
        let gaps = [-5.0, -1.0, -0.1, 0.0, 0.1, 1.0, 5.0];
        for model in variants() {
            let probs: Vec<f64> = gaps.iter().map(|&g| model.certainty(g, 0.0)).collect();
            for pair in probs.windows(2) {
                assert!(
                    pair[1] >= pair[0],
                    "{model:?} not non-decreasing: {probs:?}"
                );
            }
        }
    }

    #[test]
    fn test_bounded_in_unit_interval() {
        for model in variants() {
            for gap in [-1e6, -10.0, 0.0, 10.0, 1e6] {
                let p = model.certainty(gap, 0.0);
                assert!((0.0..=1.0).contains(&p), "{model:?} out of range: {p}");
            }
        }
    }

    #[test]
    fn test_score_difference_clamps() {
        let model = OutrankingCertainty::ScoreDifference { scale: 1.0 };
        assert!((model.certainty(2.0, 0.0) - 1.0).abs() < 1e-12);
        assert!(model.certainty(0.0, 2.0).abs() < 1e-12);
        assert!((model.certainty(0.5, 0.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_scale_flattens_curve() {
        let sharp = OutrankingCertainty::BradleyTerry { scale: 0.1 };
        let flat = OutrankingCertainty::BradleyTerry { scale: 10.0 };
        assert!(sharp.certainty(1.0, 0.0) > flat.certainty(1.0, 0.0));
    }

    #[test]
    fn test_certainty_between_scores_both_sides() {
        let model = OutrankingCertainty::ScoreDifference { scale: 1.0 };
        let mut scoring = WeightedSum::new(vec![1.0, 1.0]);

        let high = Alternative::new(vec![0.6, 0.6]);
        let low = Alternative::new(vec![0.2, 0.2]);

        // gap = 1.2 - 0.4 = 0.8 -> 0.5 + 0.4
        let p = model.certainty_between(&high, &low, &mut scoring);
        assert!((p - 0.9).abs() < 1e-12);
        let q = model.certainty_between(&low, &high, &mut scoring);
        assert!((q - 0.1).abs() < 1e-12);
    }
}
