//! Decision-rule data model.
//!
//! A [`DecisionRule`] is an antecedent item-set plus a single consequent
//! item, carrying the rule's multi-criteria evaluation point (its
//! [`Alternative`]). Measure computation itself — cover and support counting
//! over a transaction database — lives outside this crate behind the
//! [`RuleEvaluator`] trait, so the data model stays independent of how
//! measures are produced (CPU bitsets, GPU intersection, ...).

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable multi-criteria evaluation point: one measure value per
/// dimension, in the order of the owning rule's measure names.
///
/// Equality and hashing are by value, comparing the raw bit patterns of each
/// dimension. This makes `Alternative` usable as a map key; it also means
/// `0.0` and `-0.0` are considered distinct, which is irrelevant for measure
/// vectors in practice.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alternative {
    values: Vec<f64>,
}

impl Alternative {
    /// Wraps a measure vector.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// The measure values, in measure-name order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of dimensions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector has no dimensions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PartialEq for Alternative {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for Alternative {}

impl Hash for Alternative {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in &self.values {
            v.to_bits().hash(state);
        }
    }
}

/// Computes the measure vector of a candidate rule.
///
/// This is the seam to the external cover/support machinery. Returns `None`
/// when the rule is invalid under the dataset's validity predicate (e.g. no
/// covering transaction); the caller treats an invalid rule as scoring 0,
/// never as an error.
pub trait RuleEvaluator {
    /// Evaluates the given antecedent/consequent against the dataset.
    ///
    /// # Arguments
    /// * `antecedent` - Antecedent item tokens (unique, unordered)
    /// * `consequent` - The single consequent item token
    /// * `smoothing` - Additive smoothing constant for count-based measures
    /// * `measure_names` - Which measures to compute, and in which order
    fn evaluate(
        &self,
        antecedent: &BTreeSet<String>,
        consequent: &str,
        smoothing: f64,
        measure_names: &[String],
    ) -> Option<Alternative>;
}

/// A decision rule `antecedent ⇒ consequent` with its cached evaluation.
///
/// The cached [`Alternative`] is recomputed on every mutation: the mutating
/// methods take the evaluator as an argument, so the cache can never go
/// stale relative to the current antecedent/consequent. `None` marks the
/// rule as invalid.
///
/// Rule equality is by antecedent and consequent value only; two rules with
/// the same items are the same rule regardless of cached state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecisionRule {
    antecedent: BTreeSet<String>,
    consequent: String,
    measure_names: Vec<String>,
    smoothing: f64,
    alternative: Option<Alternative>,
}

impl DecisionRule {
    /// Builds a rule and computes its evaluation point.
    pub fn new<E: RuleEvaluator>(
        antecedent: BTreeSet<String>,
        consequent: impl Into<String>,
        measure_names: Vec<String>,
        smoothing: f64,
        evaluator: &E,
    ) -> Self {
        let mut rule = Self {
            antecedent,
            consequent: consequent.into(),
            measure_names,
            smoothing,
            alternative: None,
        };
        rule.refresh(evaluator);
        rule
    }

    /// The antecedent item tokens.
    pub fn antecedent(&self) -> &BTreeSet<String> {
        &self.antecedent
    }

    /// The consequent item token.
    pub fn consequent(&self) -> &str {
        &self.consequent
    }

    /// The ordered measure names this rule is evaluated under.
    pub fn measure_names(&self) -> &[String] {
        &self.measure_names
    }

    /// The smoothing constant used for evaluation.
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// The cached evaluation point, `None` when the rule is invalid.
    pub fn alternative(&self) -> Option<&Alternative> {
        self.alternative.as_ref()
    }

    /// Whether the rule is valid under the evaluator's predicate.
    pub fn is_valid(&self) -> bool {
        self.alternative.is_some()
    }

    /// Toggles an item in the antecedent: inserts it when absent, removes it
    /// when present. Returns `true` when the item was inserted. Toggling the
    /// same item again restores the previous antecedent exactly.
    pub fn toggle_antecedent<E: RuleEvaluator>(&mut self, item: &str, evaluator: &E) -> bool {
        let inserted = if self.antecedent.contains(item) {
            self.antecedent.remove(item);
            false
        } else {
            self.antecedent.insert(item.to_string());
            true
        };
        self.refresh(evaluator);
        inserted
    }

    /// Replaces the consequent item.
    pub fn set_consequent<E: RuleEvaluator>(&mut self, item: &str, evaluator: &E) {
        self.consequent.clear();
        self.consequent.push_str(item);
        self.refresh(evaluator);
    }

    /// Takes a lightweight value copy sufficient for archiving.
    pub fn snapshot(&self) -> RuleSnapshot {
        RuleSnapshot {
            antecedent: self.antecedent.clone(),
            consequent: self.consequent.clone(),
            alternative: self.alternative.clone(),
        }
    }

    fn refresh<E: RuleEvaluator>(&mut self, evaluator: &E) {
        self.alternative = evaluator.evaluate(
            &self.antecedent,
            &self.consequent,
            self.smoothing,
            &self.measure_names,
        );
    }
}

impl PartialEq for DecisionRule {
    fn eq(&self, other: &Self) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

impl Eq for DecisionRule {}

/// A value copy of a rule: antecedent, consequent, and the evaluation point
/// it had when snapshotted. Carries no measure-name list or smoothing; use
/// [`RuleSnapshot::expand`] to reattach that shared context and obtain an
/// independently usable [`DecisionRule`].
///
/// Equality is by antecedent + consequent, matching [`DecisionRule`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleSnapshot {
    antecedent: BTreeSet<String>,
    consequent: String,
    alternative: Option<Alternative>,
}

impl RuleSnapshot {
    /// The antecedent item tokens.
    pub fn antecedent(&self) -> &BTreeSet<String> {
        &self.antecedent
    }

    /// The consequent item token.
    pub fn consequent(&self) -> &str {
        &self.consequent
    }

    /// The evaluation point captured at snapshot time.
    pub fn alternative(&self) -> Option<&Alternative> {
        self.alternative.as_ref()
    }

    /// Rebuilds a full rule by reattaching the measure-name list and
    /// smoothing constant of `reference`. The cached evaluation point is
    /// kept as-is (it was consistent when the snapshot was taken), so no
    /// evaluator round-trip is needed.
    pub fn expand(&self, reference: &DecisionRule) -> DecisionRule {
        DecisionRule {
            antecedent: self.antecedent.clone(),
            consequent: self.consequent.clone(),
            measure_names: reference.measure_names.clone(),
            smoothing: reference.smoothing,
            alternative: self.alternative.clone(),
        }
    }
}

impl PartialEq for RuleSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

impl Eq for RuleSnapshot {}
