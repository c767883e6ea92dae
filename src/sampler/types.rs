//! Dataset capability consumed by the sampler.

use crate::rule::{DecisionRule, RuleEvaluator};
use rand::Rng;

/// Everything the sampler needs from a dataset: rule evaluation (inherited
/// from [`RuleEvaluator`]), the two item universes, and random valid-rule
/// drawing.
///
/// Cover/support computation, file parsing, and any accelerated set
/// intersection live behind this trait; the sampler never touches them
/// directly. Implementations must draw all randomness from the `rng` they
/// are handed so that a seeded run stays reproducible.
///
/// # Examples
///
/// ```ignore
/// struct BitsetDataset { /* transaction covers, item catalogs, ... */ }
///
/// impl RuleDataset for BitsetDataset {
///     fn sample_valid_rules<R: Rng>(
///         &self,
///         count: usize,
///         smoothing: f64,
///         measure_names: &[String],
///         rng: &mut R,
///     ) -> Vec<DecisionRule> {
///         (0..count)
///             .filter_map(|_| self.draw_covered_rule(smoothing, measure_names, rng))
///             .collect()
///     }
///
///     fn antecedent_items(&self) -> &[String] { &self.items }
///     fn consequent_items(&self) -> &[String] { &self.classes }
/// }
/// ```
pub trait RuleDataset: RuleEvaluator {
    /// Draws up to `count` valid rules uniformly at random. Returning fewer
    /// rules than requested is fine; returning none makes initialization
    /// fail.
    fn sample_valid_rules<R: Rng>(
        &self,
        count: usize,
        smoothing: f64,
        measure_names: &[String],
        rng: &mut R,
    ) -> Vec<DecisionRule>;

    /// The ordered universe of antecedent item tokens.
    fn antecedent_items(&self) -> &[String];

    /// The ordered universe of consequent item tokens.
    fn consequent_items(&self) -> &[String];
}
