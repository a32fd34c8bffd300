//! Colony configuration.

use crate::error::{validate_decay, validate_exponent, AcoError, Result};

/// Configuration for the Ant System on the TSP.
///
/// # Defaults
///
/// ```
/// use u_antcolony::tsp::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.n_ants, 10);
/// assert_eq!(config.n_iterations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_antcolony::tsp::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_n_ants(20)
///     .with_decay(0.5)
///     .with_alpha(1.0)
///     .with_beta(2.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants constructed per iteration. Must be at least 1.
    pub n_ants: usize,

    /// Iterations to run. Must be at least 1.
    pub n_iterations: usize,

    /// Multiplicative evaporation factor applied once per iteration, in `[0, 1)`.
    ///
    /// This is the fraction of pheromone that *survives*: 0.5 halves every
    /// entry, 0.0 erases all memory between iterations.
    pub decay: f64,

    /// Pheromone exponent. Must be non-negative.
    pub alpha: f64,

    /// Distance-heuristic exponent. Must be non-negative.
    pub beta: f64,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Whether to build ants on the rayon pool.
    ///
    /// Only effective with the `parallel` cargo feature. Results do not
    /// depend on this flag.
    pub parallel: bool,

    /// Optional wall-clock limit in milliseconds, checked between iterations.
    ///
    /// `None` disables time-based termination (the default).
    pub time_limit_ms: Option<u64>,

    /// Stop after this many consecutive iterations without improving the
    /// global best. 0 disables early stopping (the default).
    pub stagnation_limit: usize,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            n_ants: 10,
            n_iterations: 100,
            decay: 0.5,
            alpha: 1.0,
            beta: 2.0,
            seed: None,
            parallel: true,
            time_limit_ms: None,
            stagnation_limit: 0,
        }
    }
}

impl AcoConfig {
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

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
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

    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.n_ants < 1 {
            return Err(AcoError::parameter("n_ants", "must be at least 1"));
        }
        if self.n_iterations < 1 {
            return Err(AcoError::parameter("n_iterations", "must be at least 1"));
        }
        validate_decay(self.decay)?;
        validate_exponent("alpha", self.alpha)?;
        validate_exponent("beta", self.beta)?;
        Ok(())
    }
}
