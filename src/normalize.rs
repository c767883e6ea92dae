//! Running measure-vector normalization.
//!
//! The sampler observes measure vectors in an unknown, open-ended range, so
//! normalization statistics are accumulated online: [`Normalizer::train`]
//! extends running per-dimension bounds, [`Normalizer::apply`] rescales a
//! vector against the bounds observed so far without mutating anything.
//! Each sampler run owns a fresh instance.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Value produced for a dimension whose observed range is degenerate
/// (`max == min`, including never-trained dimensions).
pub const DEGENERATE_DIMENSION: f64 = 0.0;

/// How a vector is rescaled on [`Normalizer::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NormalizationMethod {
    /// Returns the input unchanged.
    Identity,

    /// Rescales each dimension to `(x - min) / (max - min)` using the
    /// bounds observed so far. Degenerate dimensions map to
    /// [`DEGENERATE_DIMENSION`].
    #[default]
    MinMax,
}

/// Running per-dimension min/max statistics.
///
/// Only [`Normalizer::train`] mutates state; [`Normalizer::apply`] is pure.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    mins: Vec<f64>,
    maxs: Vec<f64>,
}

impl Normalizer {
    /// Creates a normalizer with no observed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of dimensions observed so far.
    pub fn dimensions(&self) -> usize {
        self.mins.len()
    }

    /// Extends the running bounds to include `vector`. Dimensions beyond
    /// the current count are added on the fly.
    pub fn train(&mut self, vector: &[f64]) {
        if vector.len() > self.mins.len() {
            self.mins.resize(vector.len(), f64::INFINITY);
            self.maxs.resize(vector.len(), f64::NEG_INFINITY);
        }
        for (d, &x) in vector.iter().enumerate() {
            if x < self.mins[d] {
                self.mins[d] = x;
            }
            if x > self.maxs[d] {
                self.maxs[d] = x;
            }
        }
    }

    /// Rescales `vector` using the bounds observed so far.
    pub fn apply(&self, vector: &[f64], method: NormalizationMethod) -> Vec<f64> {
        match method {
            NormalizationMethod::Identity => vector.to_vec(),
            NormalizationMethod::MinMax => vector
                .iter()
                .enumerate()
                .map(|(d, &x)| {
                    if d >= self.mins.len() {
                        return DEGENERATE_DIMENSION;
                    }
                    let range = self.maxs[d] - self.mins[d];
                    if range > 0.0 {
                        (x - self.mins[d]) / range
                    } else {
                        DEGENERATE_DIMENSION
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identity_returns_input() {
        let norm = Normalizer::new();
        let v = vec![3.0, -1.5, 0.0];
        assert_eq!(norm.apply(&v, NormalizationMethod::Identity), v);
    }

    #[test]
    fn test_min_max_rescales() {
        let mut norm = Normalizer::new();
        norm.train(&[0.0, 10.0]);
        norm.train(&[4.0, 20.0]);

        let out = norm.apply(&[2.0, 15.0], NormalizationMethod::MinMax);
        assert!((out[0] - 0.5).abs() < 1e-12);
        assert!((out[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_observation_is_degenerate() {
        // One trained vector means min == max everywhere; the fallback
        // applies and nothing panics.
        let mut norm = Normalizer::new();
        norm.train(&[3.0, 7.0]);

        let out = norm.apply(&[3.0, 7.0], NormalizationMethod::MinMax);
        assert_eq!(out, vec![DEGENERATE_DIMENSION, DEGENERATE_DIMENSION]);
    }

    #[test]
    fn test_untrained_dimensions_are_degenerate() {
        let mut norm = Normalizer::new();
        norm.train(&[0.0]);
        norm.train(&[2.0]);

        let out = norm.apply(&[1.0, 5.0, 9.0], NormalizationMethod::MinMax);
        assert!((out[0] - 0.5).abs() < 1e-12);
        assert_eq!(out[1], DEGENERATE_DIMENSION);
        assert_eq!(out[2], DEGENERATE_DIMENSION);
    }

    #[test]
    fn test_apply_does_not_mutate() {
        let mut norm = Normalizer::new();
        norm.train(&[1.0, 2.0]);
        let before = norm.clone();

        let _ = norm.apply(&[100.0, -100.0], NormalizationMethod::MinMax);
        let _ = norm.apply(&[100.0, -100.0], NormalizationMethod::Identity);

        assert_eq!(norm.mins, before.mins);
        assert_eq!(norm.maxs, before.maxs);
    }

    #[test]
    fn test_train_grows_dimensions() {
        let mut norm = Normalizer::new();
        norm.train(&[1.0]);
        norm.train(&[0.0, 5.0, 10.0]);
        assert_eq!(norm.dimensions(), 3);
    }

    proptest! {
        #[test]
        fn prop_trained_vectors_map_into_unit_interval(
            vectors in prop::collection::vec(
                prop::collection::vec(-1e6f64..1e6, 4),
                1..20,
            )
        ) {
            let mut norm = Normalizer::new();
            for v in &vectors {
                norm.train(v);
            }
            for v in &vectors {
                for &x in &norm.apply(v, NormalizationMethod::MinMax) {
                    prop_assert!((0.0..=1.0).contains(&x));
                }
            }
        }
    }
}
