//! Colony execution loop.

use super::colony::Colony;
use super::config::AcoConfig;
use super::distance::DistanceMatrix;
use super::types::{AntSolution, IterationResult};
use crate::error::{AcoError, Result};
use crate::observer::Observer;
use crate::timing::elapsed_ms;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Result of an ant colony run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// The best tour found and its length.
    pub best: AntSolution,

    /// Number of iterations completed.
    pub iterations: usize,

    /// Seed that reproduces this run.
    pub seed: u64,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Whether the wall-clock limit stopped the run.
    pub timed_out: bool,

    /// Whether the stagnation limit stopped the run.
    pub stagnated: bool,

    /// Global-best length after each completed iteration.
    pub length_history: Vec<f64>,
}

/// Executes the Ant System on a TSP instance.
///
/// # Usage
///
/// ```
/// use u_antcolony::tsp::{AcoConfig, AcoRunner, DistanceMatrix};
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let config = AcoConfig::default().with_n_iterations(20).with_seed(42);
/// let result = AcoRunner::run(&dm, &config).unwrap();
/// assert!((result.best.length - 4.0).abs() < 1e-9);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the colony for the configured number of iterations.
    pub fn run(distances: &DistanceMatrix, config: &AcoConfig) -> Result<AcoResult> {
        Self::run_with_cancel(distances, config, &mut (), None)
    }

    /// Builds the distance matrix from coordinates, then runs.
    pub fn solve(points: &[(f64, f64)], config: &AcoConfig) -> Result<AcoResult> {
        let distances = DistanceMatrix::from_coordinates(points)?;
        Self::run(&distances, config)
    }

    /// Runs and reports every iteration to `observer`.
    pub fn run_with_observer<O: Observer<IterationResult>>(
        distances: &DistanceMatrix,
        config: &AcoConfig,
        observer: &mut O,
    ) -> Result<AcoResult> {
        Self::run_with_cancel(distances, config, observer, None)
    }

    /// Runs with an observer and an optional cancellation token.
    ///
    /// The token is checked between iterations. When it is set, the run
    /// stops and returns the best tour found so far. A token that is already
    /// set still lets the first iteration complete, so a tour is always
    /// available.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidParameter`] if `config` is invalid; nothing runs.
    pub fn run_with_cancel<O: Observer<IterationResult>>(
        distances: &DistanceMatrix,
        config: &AcoConfig,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult> {
        let mut colony = Colony::new(distances, config.clone())?;
        let start = Instant::now();

        tracing::info!(
            event = "solve_start",
            cities = distances.size(),
            n_ants = config.n_ants,
            n_iterations = config.n_iterations,
            decay = config.decay,
            alpha = config.alpha,
            beta = config.beta,
            seed = colony.seed(),
        );

        let mut length_history = Vec::with_capacity(config.n_iterations);
        let mut cancelled = false;
        let mut timed_out = false;
        let mut stagnated = false;
        let mut stagnation_counter = 0usize;

        for iteration in 0..config.n_iterations {
            if iteration > 0 {
                if let Some(ref flag) = cancel {
                    if flag.load(Ordering::Relaxed) {
                        cancelled = true;
                        break;
                    }
                }
                if let Some(limit) = config.time_limit_ms {
                    if elapsed_ms(start) >= limit {
                        timed_out = true;
                        break;
                    }
                }
            }

            let previous_best = length_history.last().copied();
            let event = colony.step();
            if previous_best.is_some_and(|prev| event.best_length >= prev) {
                stagnation_counter += 1;
            } else {
                stagnation_counter = 0;
            }
            length_history.push(event.best_length);
            observer.on_iteration(&event);

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        let iterations = colony.iteration();
        let seed = colony.seed();
        let best = colony
            .into_best()
            .ok_or_else(|| AcoError::InvalidInput("no iteration completed".into()))?;

        tracing::info!(
            event = "solve_end",
            iterations,
            best_length = best.length,
            cancelled,
            timed_out,
            stagnated,
            duration_ms = elapsed_ms(start),
        );

        Ok(AcoResult {
            best,
            iterations,
            seed,
            cancelled,
            timed_out,
            stagnated,
            length_history,
        })
    }
}
