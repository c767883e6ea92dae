//! Stochastic rule sampler.
//!
//! A single-solution trajectory search over the space of decision rules.
//! Each iteration perturbs the current rule item by item in random
//! permutation order, accepting at most one antecedent and one consequent
//! mutation per iteration through a Bernoulli trial on the pairwise
//! outranking certainty. A bounded archive keeps the best distinct rules
//! seen; the iteration budget is the only stopping condition.

mod archive;
mod config;
mod error;
mod runner;
mod types;

pub use archive::TopKArchive;
pub use config::{PerturbationScheme, SamplerConfig};
pub use error::SamplerError;
pub use runner::{RuleSampler, SampleResult, ScoredRule};
pub use types::RuleDataset;
