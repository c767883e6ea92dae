//! Stochastic multi-criteria sampling of decision rules.
//!
//! Searches the combinatorial space of candidate rules (antecedent item-set
//! ⇒ consequent item) with randomized local search instead of exhaustive
//! enumeration, surfacing a bounded set of high-quality rules under a
//! multi-criteria measure vector:
//!
//! - **Sampler**: the trajectory search engine — per-iteration random
//!   permutations over both item universes, Bernoulli acceptance of single
//!   or block perturbations, bounded top-K archive.
//! - **Outranking certainty**: pluggable pairwise acceptance models
//!   (probit, logistic, clamped linear) that turn a score gap into an
//!   acceptance probability.
//! - **Normalizer**: running per-dimension min/max statistics, trained
//!   online, applied purely.
//! - **Scoring**: the scalar scoring contract, fixed aggregates, and a
//!   self-calibrating adaptive scorer that learns from bounded archives of
//!   previously seen alternatives.
//!
//! # Architecture
//!
//! The crate contains no I/O and no dataset machinery: cover/support
//! computation, file parsing, and report export live with the consumer and
//! are reached through the [`rule::RuleEvaluator`] and
//! [`sampler::RuleDataset`] capability traits. Every sampler run owns all
//! of its mutable state (RNG included), so runs parallelize from the
//! outside without any internal locking.

pub mod certainty;
pub mod normalize;
pub mod rule;
pub mod sampler;
pub mod scoring;
