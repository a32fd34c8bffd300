//! Coverage optimizer configuration.

use crate::error::{validate_decay, validate_exponent, AcoError, Result};

/// Configuration for pheromone-guided antenna placement.
///
/// # Examples
///
/// ```
/// use u_antcolony::coverage::CoverageConfig;
///
/// let config = CoverageConfig::default().with_n_ants(30).with_seed(7);
/// assert!((config.decay - 0.95).abs() < 1e-12);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageConfig {
    /// Placements sampled per iteration. Must be at least 1.
    pub n_ants: usize,

    /// Iterations to run. Must be at least 1.
    pub n_iterations: usize,

    /// Fraction of pheromone surviving each iteration, in `[0, 1)`.
    pub decay: f64,

    /// Pheromone exponent. 0 makes every placement uniformly random.
    pub alpha: f64,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Whether to sample placements on the rayon pool (`parallel` feature).
    pub parallel: bool,

    /// Optional wall-clock limit in milliseconds, checked between iterations.
    pub time_limit_ms: Option<u64>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            n_ants: 20,
            n_iterations: 50,
            decay: 0.95,
            alpha: 1.0,
            seed: None,
            parallel: true,
            time_limit_ms: None,
        }
    }
}

impl CoverageConfig {
    pub fn with_n_ants(mut self, n: usize) -> Self {
        self.n_ants = n;
        self
    }

    pub fn with_n_iterations(mut self, n: usize) -> Self {
        self.n_iterations = n;
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.n_ants < 1 {
            return Err(AcoError::parameter("n_ants", "must be at least 1"));
        }
        if self.n_iterations < 1 {
            return Err(AcoError::parameter("n_iterations", "must be at least 1"));
        }
        validate_decay(self.decay)?;
        validate_exponent("alpha", self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        assert!(CoverageConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        assert!(CoverageConfig::default().with_n_ants(0).validate().is_err());
        assert!(CoverageConfig::default().with_n_iterations(0).validate().is_err());
        assert!(CoverageConfig::default().with_decay(1.0).validate().is_err());
        assert!(CoverageConfig::default().with_alpha(-2.0).validate().is_err());
    }
}
