//! Tunable parameters of a sampling run.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::convergence::DEFAULT_EPSILON;
use super::err::ConfigurationError;

/// The parameters of a [`GibbsSampler`](crate::sampler::GibbsSampler) run.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    /// The width of the motif to search.
    pub width: usize,
    /// The maximum number of sampling steps of each chain.
    pub iterations: usize,
    /// The pseudocount added to every cell of a count matrix.
    pub pseudocount: f64,
    /// The distance under which two consecutive matrices are similar.
    pub epsilon: f64,
    /// The number of consecutive similar steps after which a chain stops.
    ///
    /// Early stopping is disabled when set to zero.
    pub patience: usize,
    /// The number of independent chains to run.
    pub restarts: usize,
    /// The seed of the random number generator, if any.
    pub seed: Option<u64>,
}

impl SamplerConfig {
    /// Create a new configuration for the given motif width.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width == 0 {
            return Err(ConfigurationError::InvalidWidth(0));
        }
        if self.iterations == 0 {
            return Err(ConfigurationError::InvalidIterations(0));
        }
        if !self.pseudocount.is_finite() || self.pseudocount <= 0.0 {
            return Err(ConfigurationError::InvalidPseudocount(self.pseudocount));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigurationError::InvalidEpsilon(self.epsilon));
        }
        if self.restarts == 0 {
            return Err(ConfigurationError::InvalidRestarts);
        }
        Ok(())
    }

    /// Create the random number generator of a run.
    ///
    /// The generator is seeded from [`seed`](Self::seed) when set, and
    /// from system entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            width: 8,
            iterations: 1000,
            pseudocount: 1.0,
            epsilon: DEFAULT_EPSILON,
            patience: 0,
            restarts: 1,
            seed: None,
        }
    }
}
