//! One colony's mutable state and its per-iteration update.

use super::ant::{AntPathBuilder, ZERO_DISTANCE_HEURISTIC};
use super::config::AcoConfig;
use super::distance::DistanceMatrix;
use super::types::{AntSolution, IterationResult};
use crate::error::Result;
use crate::pheromone::PheromoneMatrix;
use crate::random::{ant_rng, random_seed};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Owns the pheromone matrix and the global best for one run.
///
/// Ants never see a mutable alias of the pheromone state: during
/// construction they borrow it immutably, and the update (all deposits,
/// then evaporation) happens only after every ant has finished.
///
/// Most callers want [`AcoRunner`](super::AcoRunner); `Colony` is for
/// driving iterations by hand.
///
/// # Examples
///
/// ```
/// use u_antcolony::tsp::{AcoConfig, Colony, DistanceMatrix};
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let mut colony = Colony::new(&dm, AcoConfig::default().with_seed(7)).unwrap();
/// let event = colony.step();
/// assert_eq!(event.iteration, 0);
/// assert_eq!(event.best_path.city_count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Colony<'a> {
    distances: &'a DistanceMatrix,
    config: AcoConfig,
    pheromone: PheromoneMatrix,
    seed: u64,
    iteration: usize,
    best: Option<AntSolution>,
}

impl<'a> Colony<'a> {
    /// Validates `config` and initializes the pheromone matrix to `1/n`.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidParameter`](crate::AcoError::InvalidParameter)
    /// if the configuration is invalid. No state is created in that case.
    pub fn new(distances: &'a DistanceMatrix, config: AcoConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(random_seed);
        Ok(Self {
            distances,
            pheromone: PheromoneMatrix::new(distances.size()),
            config,
            seed,
            iteration: 0,
            best: None,
        })
    }

    /// Seed actually used by this run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Current pheromone state.
    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// Number of completed iterations.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Best solution found so far, if any iteration has completed.
    pub fn best(&self) -> Option<&AntSolution> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<AntSolution> {
        self.best
    }

    /// Runs one iteration: build ants, deposit, evaporate, track best.
    pub fn step(&mut self) -> IterationResult {
        let solutions = self.build_ants();

        for sol in &solutions {
            self.pheromone
                .deposit_path(sol.path.as_slice(), deposit_amount(sol.length));
        }
        self.pheromone.evaporate(self.config.decay);

        // First-encountered wins ties.
        let mut iter_best = &solutions[0];
        for sol in &solutions[1..] {
            if sol.length < iter_best.length {
                iter_best = sol;
            }
        }
        let iteration_best_length = iter_best.length;
        let iteration_mean_length =
            solutions.iter().map(|s| s.length).sum::<f64>() / solutions.len() as f64;

        let improved = self
            .best
            .as_ref()
            .is_none_or(|best| iteration_best_length < best.length);
        if improved {
            self.best = Some(iter_best.clone());
        }

        let best = self.best.as_ref().unwrap_or(iter_best);
        let event = IterationResult {
            iteration: self.iteration,
            best_path: best.path.clone(),
            best_length: best.length,
            iteration_best_length,
            iteration_mean_length,
        };

        tracing::debug!(
            event = "iteration",
            iteration = self.iteration,
            iteration_best = iteration_best_length,
            best = event.best_length,
            improved,
        );

        self.iteration += 1;
        event
    }

    /// Builds this iteration's ants against the current pheromone state.
    ///
    /// Each ant draws from its own derived sub-stream, so the result is the
    /// same with or without parallelism.
    fn build_ants(&self) -> Vec<AntSolution> {
        let builder = AntPathBuilder::new(
            self.distances,
            &self.pheromone,
            self.config.alpha,
            self.config.beta,
        );
        let seed = self.seed;
        let iteration = self.iteration;
        let build = |ant: usize| builder.build(&mut ant_rng(seed, iteration, ant));

        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return (0..self.config.n_ants).into_par_iter().map(build).collect();
        }

        (0..self.config.n_ants).map(build).collect()
    }
}

/// Pheromone an ant lays on each edge of a tour of length `length`.
///
/// `1/length`, capped at [`ZERO_DISTANCE_HEURISTIC`] so a zero-length tour
/// (every city on the same spot) stays finite.
fn deposit_amount(length: f64) -> f64 {
    (1.0 / length).min(ZERO_DISTANCE_HEURISTIC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AcoError;

    fn pentagon() -> DistanceMatrix {
        let pts: Vec<(f64, f64)> = (0..5)
            .map(|k| {
                let a = k as f64 * std::f64::consts::TAU / 5.0;
                (a.cos() * 10.0, a.sin() * 10.0)
            })
            .collect();
        DistanceMatrix::from_coordinates(&pts).unwrap()
    }

    #[test]
    fn test_new_initializes_uniform_pheromone() {
        let dm = pentagon();
        let colony = Colony::new(&dm, AcoConfig::default().with_seed(1)).unwrap();
        assert_eq!(colony.iteration(), 0);
        assert!(colony.best().is_none());
        assert_eq!(colony.pheromone(), &PheromoneMatrix::new(5));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let dm = pentagon();
        let err = Colony::new(&dm, AcoConfig::default().with_decay(1.0)).unwrap_err();
        assert!(matches!(err, AcoError::InvalidParameter { name: "decay", .. }));
    }

    #[test]
    fn test_step_keeps_pheromone_symmetric() {
        let dm = pentagon();
        let mut colony = Colony::new(&dm, AcoConfig::default().with_seed(3)).unwrap();
        for _ in 0..10 {
            colony.step();
            assert!(colony.pheromone().is_symmetric());
        }
        assert_eq!(colony.iteration(), 10);
    }

    #[test]
    fn test_untraversed_edges_only_evaporate() {
        let dm = pentagon();
        let config = AcoConfig::default().with_n_ants(1).with_decay(0.5).with_seed(11);
        let mut colony = Colony::new(&dm, config).unwrap();
        let before = colony.pheromone().clone();
        let event = colony.step();

        let traversed: Vec<(usize, usize)> = event.best_path.edges().collect();
        let on_tour = |i: usize, j: usize| {
            traversed
                .iter()
                .any(|&(a, b)| (a, b) == (i, j) || (b, a) == (i, j))
        };
        for i in 0..5 {
            for j in 0..5 {
                let after = colony.pheromone().get(i, j);
                if on_tour(i, j) {
                    let expected = (before.get(i, j) + 1.0 / event.best_length) * 0.5;
                    assert!((after - expected).abs() < 1e-12);
                } else {
                    assert_eq!(after, before.get(i, j) * 0.5);
                }
            }
        }
    }

    #[test]
    fn test_event_reports_global_best() {
        let dm = pentagon();
        let mut colony = Colony::new(&dm, AcoConfig::default().with_seed(5)).unwrap();
        let mut best_so_far = f64::INFINITY;
        for _ in 0..15 {
            let event = colony.step();
            best_so_far = best_so_far.min(event.iteration_best_length);
            assert_eq!(event.best_length, best_so_far);
            assert!(event.iteration_best_length <= event.iteration_mean_length + 1e-12);
            assert!((dm.tour_length(&event.best_path) - event.best_length).abs() < 1e-9);
        }
        assert_eq!(colony.best().map(|b| b.length), Some(best_so_far));
    }

    #[test]
    fn test_deposit_amount_is_finite_for_zero_length() {
        assert_eq!(deposit_amount(0.0), ZERO_DISTANCE_HEURISTIC);
        assert_eq!(deposit_amount(f64::MIN_POSITIVE), ZERO_DISTANCE_HEURISTIC);
        assert!((deposit_amount(4.0) - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_coincident_cities_keep_pheromone_finite() {
        let dm = DistanceMatrix::from_coordinates(&[(4.0, 4.0), (4.0, 4.0)]).unwrap();
        for decay in [0.0, 0.5] {
            let config = AcoConfig::default().with_decay(decay).with_seed(9);
            let mut colony = Colony::new(&dm, config).unwrap();
            for _ in 0..3 {
                let event = colony.step();
                assert_eq!(event.best_length, 0.0);
                let tau = colony.pheromone();
                assert!(tau.is_symmetric(), "decay={decay}: {:?}", tau.as_slice());
                assert!(
                    tau.as_slice().iter().all(|v| v.is_finite() && *v >= 0.0),
                    "decay={decay}: {:?}",
                    tau.as_slice()
                );
            }
        }
    }

    #[test]
    fn test_sequential_matches_parallel_flag() {
        let dm = pentagon();
        let base = AcoConfig::default().with_seed(21);
        let mut a = Colony::new(&dm, base.clone().with_parallel(false)).unwrap();
        let mut b = Colony::new(&dm, base.with_parallel(true)).unwrap();
        for _ in 0..5 {
            assert_eq!(a.step(), b.step());
        }
        assert_eq!(a.pheromone(), b.pheromone());
    }
}
