//! Sampler configuration.

use crate::normalize::NormalizationMethod;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the antecedent phase perturbs the current rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PerturbationScheme {
    /// Probe one item per step: toggle it, keep or undo.
    #[default]
    ItemToggle,

    /// Probe a contiguous block of items per step, sized at half the
    /// current antecedent (at least one). The whole block is toggled and,
    /// on rejection, undone together.
    BlockToggle,
}

/// Configuration for a sampler run.
///
/// # Examples
///
/// ```
/// use rule_sampler::sampler::SamplerConfig;
///
/// let config = SamplerConfig::new(["support", "confidence", "lift"])
///     .with_max_iterations(10_000)
///     .with_top_k(25)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplerConfig {
    /// Iteration budget. This is the only stopping condition; 0 returns
    /// just the seed rule.
    pub max_iterations: usize,

    /// Archive capacity: at most this many rules come back.
    pub top_k: usize,

    /// Additive smoothing constant handed to the dataset for count-based
    /// measures.
    pub smoothing: f64,

    /// Ordered measure names defining the evaluation vector.
    pub measure_names: Vec<String>,

    /// How vectors are rescaled before scoring.
    pub normalization: NormalizationMethod,

    /// Antecedent perturbation scheme.
    pub perturbation: PerturbationScheme,

    /// Valid rules drawn at warm-up to prime the normalizer.
    pub warmup_samples: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl SamplerConfig {
    /// Creates a configuration with the given measure names and defaults
    /// everywhere else.
    pub fn new<I, S>(measure_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            max_iterations: 1000,
            top_k: 1,
            smoothing: 1e-6,
            measure_names: measure_names.into_iter().map(Into::into).collect(),
            normalization: NormalizationMethod::default(),
            perturbation: PerturbationScheme::default(),
            warmup_samples: 100,
            seed: None,
        }
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_normalization(mut self, method: NormalizationMethod) -> Self {
        self.normalization = method;
        self
    }

    pub fn with_perturbation(mut self, scheme: PerturbationScheme) -> Self {
        self.perturbation = scheme;
        self
    }

    pub fn with_warmup_samples(mut self, n: usize) -> Self {
        self.warmup_samples = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.top_k == 0 {
            return Err("top_k must be at least 1".into());
        }
        if self.measure_names.is_empty() {
            return Err("measure_names must not be empty".into());
        }
        if !self.smoothing.is_finite() || self.smoothing < 0.0 {
            return Err(format!(
                "smoothing must be finite and non-negative, got {}",
                self.smoothing
            ));
        }
        Ok(())
    }
}
