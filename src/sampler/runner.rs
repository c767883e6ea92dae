//! Sampler execution loop.

use super::archive::TopKArchive;
use super::config::{PerturbationScheme, SamplerConfig};
use super::error::SamplerError;
use super::types::RuleDataset;
use crate::certainty::OutrankingCertainty;
use crate::normalize::Normalizer;
use crate::rule::{Alternative, DecisionRule};
use crate::scoring::ScoringFunction;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A sampled rule together with the score it was archived under.
#[derive(Debug, Clone)]
pub struct ScoredRule {
    /// The rule, expanded against the seed rule's shared context.
    pub rule: DecisionRule,

    /// Score at archiving time (0 would mean an invalid rule; those never
    /// enter the archive through the normal path).
    pub score: f64,
}

/// Result of a sampler run.
#[derive(Debug, Clone)]
pub struct SampleResult {
    /// Up to `top_k` distinct rules, descending by score.
    pub rules: Vec<ScoredRule>,

    /// One score per completed iteration, win or lose. Diagnostic only.
    pub score_history: Vec<f64>,

    /// Number of completed iterations (always the configured budget).
    pub iterations: usize,

    /// Antecedent perturbations accepted by the Bernoulli trial.
    pub accepted_antecedent_moves: usize,

    /// Consequent perturbations accepted by the Bernoulli trial.
    pub accepted_consequent_moves: usize,
}

/// Executes the stochastic rule search.
///
/// The sampler walks the rule space one accepted perturbation at a time:
/// each iteration shuffles both item universes, probes candidate mutations
/// in permutation order, and keeps at most one antecedent and one consequent
/// change, accepted by a Bernoulli trial on the outranking model's pairwise
/// certainty. A bounded archive collects the best distinct rules seen.
///
/// Every run owns its state in full (RNG, normalizer, archive, history), so
/// any number of runs can execute concurrently without sharing anything, and
/// a run can be abandoned between iterations with nothing to clean up.
pub struct RuleSampler;

impl RuleSampler {
    /// Runs the search and returns the archived rules with their scores.
    ///
    /// # Errors
    ///
    /// [`SamplerError::InvalidConfig`] when the configuration fails
    /// validation; [`SamplerError::NoValidRules`] when the dataset cannot
    /// produce a single valid rule during warm-up or seeding.
    pub fn run<D, S>(
        dataset: &D,
        scoring: &mut S,
        certainty: &OutrankingCertainty,
        config: &SamplerConfig,
    ) -> Result<SampleResult, SamplerError>
    where
        D: RuleDataset,
        S: ScoringFunction,
    {
        config.validate().map_err(SamplerError::InvalidConfig)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let mut search = Search {
            dataset,
            scoring,
            certainty,
            config,
            normalizer: Normalizer::new(),
            rng,
        };

        // Warm-up: prime the normalizer statistics, no scoring involved.
        if config.warmup_samples > 0 {
            let warmup = dataset.sample_valid_rules(
                config.warmup_samples,
                config.smoothing,
                &config.measure_names,
                &mut search.rng,
            );
            if warmup.is_empty() {
                return Err(SamplerError::NoValidRules);
            }
            for rule in &warmup {
                search.train_on(rule);
            }
        }

        // Seed: one more valid rule becomes the current state.
        let seed_rule = dataset
            .sample_valid_rules(1, config.smoothing, &config.measure_names, &mut search.rng)
            .into_iter()
            .next()
            .ok_or(SamplerError::NoValidRules)?;
        let mut rule = seed_rule.clone();

        let mut archive = TopKArchive::new(config.top_k);
        let seed_score = search.rule_score(&rule);
        archive.insert(rule.snapshot(), seed_score);

        let mut score_history = Vec::with_capacity(config.max_iterations);
        let mut accepted_antecedent_moves = 0usize;
        let mut accepted_consequent_moves = 0usize;

        for _ in 0..config.max_iterations {
            let antecedent_perm = search.shuffled(dataset.antecedent_items().len());
            let consequent_perm = search.shuffled(dataset.consequent_items().len());

            let accepted = match config.perturbation {
                PerturbationScheme::ItemToggle => {
                    search.antecedent_pass(&mut rule, &antecedent_perm)
                }
                PerturbationScheme::BlockToggle => {
                    search.antecedent_block_pass(&mut rule, &antecedent_perm)
                }
            };
            if accepted {
                accepted_antecedent_moves += 1;
            }
            if search.consequent_pass(&mut rule, &consequent_perm) {
                accepted_consequent_moves += 1;
            }

            let score = search.rule_score(&rule);
            score_history.push(score);

            let snapshot = rule.snapshot();
            if !archive.contains(&snapshot) {
                archive.insert(snapshot, score);
            }
        }

        // Archived snapshots are value copies; reattach the seed rule's
        // shared context so each comes back independently usable.
        let rules = archive
            .into_ranked()
            .into_iter()
            .map(|(snapshot, score)| ScoredRule {
                rule: snapshot.expand(&seed_rule),
                score,
            })
            .collect();

        Ok(SampleResult {
            rules,
            score_history,
            iterations: config.max_iterations,
            accepted_antecedent_moves,
            accepted_consequent_moves,
        })
    }
}

/// Per-run mutable search state: private RNG, private normalizer, and the
/// injected collaborators.
struct Search<'a, D, S> {
    dataset: &'a D,
    scoring: &'a mut S,
    certainty: &'a OutrankingCertainty,
    config: &'a SamplerConfig,
    normalizer: Normalizer,
    rng: StdRng,
}

impl<D: RuleDataset, S: ScoringFunction> Search<'_, D, S> {
    /// Scores a rule: 0 when invalid, otherwise the scoring function applied
    /// to the normalized vector.
    fn rule_score(&mut self, rule: &DecisionRule) -> f64 {
        match rule.alternative() {
            Some(alternative) => {
                let normalized = Alternative::new(
                    self.normalizer
                        .apply(alternative.values(), self.config.normalization),
                );
                self.scoring.score_rule(&normalized, rule)
            }
            None => 0.0,
        }
    }

    /// Extends the normalizer bounds with the rule's current vector, when
    /// one exists.
    fn train_on(&mut self, rule: &DecisionRule) {
        if let Some(alternative) = rule.alternative() {
            self.normalizer.train(alternative.values());
        }
    }

    /// Bernoulli trial on the pairwise certainty. A candidate scoring 0 is
    /// never accepted.
    fn accept(&mut self, candidate: f64, baseline: f64) -> bool {
        let probability = if candidate == 0.0 {
            0.0
        } else {
            self.certainty
                .certainty(candidate, baseline)
                .clamp(0.0, 1.0)
        };
        self.rng.random_bool(probability)
    }

    /// Uniformly random permutation of `0..len`.
    fn shuffled(&mut self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(&mut self.rng);
        indices
    }

    /// Scans the antecedent permutation, toggling one candidate item at a
    /// time; the first accepted toggle ends the pass. Returns whether a
    /// move was accepted.
    fn antecedent_pass(&mut self, rule: &mut DecisionRule, perm: &[usize]) -> bool {
        let dataset = self.dataset;
        let items = dataset.antecedent_items();
        for &i in perm {
            self.train_on(rule);
            let baseline = self.rule_score(rule);
            rule.toggle_antecedent(&items[i], dataset);
            let candidate = self.rule_score(rule);
            if self.accept(candidate, baseline) {
                return true;
            }
            rule.toggle_antecedent(&items[i], dataset);
        }
        false
    }

    /// Batched variant of the antecedent pass: probes a contiguous block of
    /// the permutation per step, sized at half the current antecedent (at
    /// least one item), and commits or undoes the block as a whole.
    fn antecedent_block_pass(&mut self, rule: &mut DecisionRule, perm: &[usize]) -> bool {
        let dataset = self.dataset;
        let items = dataset.antecedent_items();
        let mut start = 0;
        while start < perm.len() {
            let block = (rule.antecedent().len() / 2).max(1);
            let end = (start + block).min(perm.len());

            self.train_on(rule);
            let baseline = self.rule_score(rule);
            for &i in &perm[start..end] {
                rule.toggle_antecedent(&items[i], dataset);
            }
            let candidate = self.rule_score(rule);
            if self.accept(candidate, baseline) {
                return true;
            }
            for &i in &perm[start..end] {
                rule.toggle_antecedent(&items[i], dataset);
            }
            start = end;
        }
        false
    }

    /// Same protocol over the consequent universe; the mutation replaces
    /// the single consequent value.
    fn consequent_pass(&mut self, rule: &mut DecisionRule, perm: &[usize]) -> bool {
        let dataset = self.dataset;
        let items = dataset.consequent_items();
        for &i in perm {
            self.train_on(rule);
            let baseline = self.rule_score(rule);
            let previous = rule.consequent().to_string();
            rule.set_consequent(&items[i], dataset);
            let candidate = self.rule_score(rule);
            if self.accept(candidate, baseline) {
                return true;
            }
            rule.set_consequent(&previous, dataset);
        }
        false
    }
}
