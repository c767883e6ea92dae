//! Sampler error types.

use thiserror::Error;

/// Failures a sampler run can report.
///
/// Scoring itself is total (an invalid rule scores 0), so the only fatal
/// condition inside the search is failing to obtain any valid rule while
/// initializing. An empty result after a zero-iteration run is *not* an
/// error; such a run returns exactly the seed rule.
#[derive(Debug, Error)]
pub enum SamplerError {
    /// The configuration was rejected by [`validate`].
    ///
    /// [`validate`]: crate::sampler::SamplerConfig::validate
    #[error("invalid sampler configuration: {0}")]
    InvalidConfig(String),

    /// The dataset produced no valid rule during warm-up or seeding.
    #[error("dataset produced no valid rule during warm-up/seeding")]
    NoValidRules,
}
