//! Coverage optimization loop.

use super::config::CoverageConfig;
use super::problem::CoverageProblem;
use crate::error::Result;
use crate::observer::Observer;
use crate::timing::elapsed_ms;
use crate::pheromone::PheromoneMatrix;
use crate::random::{ant_rng, random_seed, roulette_select};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A set of antenna sites and the coverage it achieves.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Chosen interest-point indices, ascending.
    pub sites: Vec<usize>,
    /// Covered interest points, in percent.
    pub coverage: f64,
}

/// Progress event emitted once per completed iteration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageIterationResult {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Best placement found so far.
    pub best: Placement,
    /// Highest coverage among this iteration's ants.
    pub iteration_best_coverage: f64,
}

/// Result of a coverage optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageResult {
    /// The best placement found.
    pub best: Placement,

    /// Number of iterations completed.
    pub iterations: usize,

    /// Seed that reproduces this run.
    pub seed: u64,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Whether the wall-clock limit stopped the run.
    pub timed_out: bool,

    /// Best coverage after each completed iteration.
    pub coverage_history: Vec<f64>,
}

/// Places antennas on interest points to maximize coverage.
///
/// Pheromone lives on pairs of interest points. Each ant picks its first
/// site uniformly and every further site with weight
/// `(mean pheromone to the sites already chosen)^alpha`. After all ants
/// finish, the iteration's best placement deposits `coverage / 100` on each
/// pair of its sites, then the whole matrix evaporates.
///
/// # Usage
///
/// ```
/// use u_antcolony::coverage::{CoverageConfig, CoverageProblem, CoverageRunner, Point};
///
/// let problem = CoverageProblem::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(100.0, 0.0),
///     Point::new(0.0, 100.0),
/// ])
/// .with_radius(10.0)
/// .with_antennas(3);
/// let result = CoverageRunner::run(&problem, &CoverageConfig::default().with_seed(1)).unwrap();
/// assert!((result.best.coverage - 100.0).abs() < 1e-12);
/// ```
pub struct CoverageRunner;

impl CoverageRunner {
    /// Runs coverage optimization.
    pub fn run(problem: &CoverageProblem, config: &CoverageConfig) -> Result<CoverageResult> {
        Self::run_with_cancel(problem, config, &mut (), None)
    }

    /// Runs and reports every iteration to `observer`.
    pub fn run_with_observer<O: Observer<CoverageIterationResult>>(
        problem: &CoverageProblem,
        config: &CoverageConfig,
        observer: &mut O,
    ) -> Result<CoverageResult> {
        Self::run_with_cancel(problem, config, observer, None)
    }

    /// Runs with an observer and an optional cancellation token.
    ///
    /// # Errors
    ///
    /// Invalid problem or configuration; nothing runs.
    pub fn run_with_cancel<O: Observer<CoverageIterationResult>>(
        problem: &CoverageProblem,
        config: &CoverageConfig,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<CoverageResult> {
        problem.validate()?;
        config.validate()?;

        let seed = config.seed.unwrap_or_else(random_seed);
        let start = Instant::now();
        let m = problem.size();
        let reach = problem.reach_table();
        let mut pheromone = PheromoneMatrix::new(m);

        tracing::info!(
            event = "solve_start",
            interest_points = m,
            obstacles = problem.obstacles.len(),
            antennas = problem.placements(),
            n_ants = config.n_ants,
            n_iterations = config.n_iterations,
            seed,
        );

        let mut best: Option<Placement> = None;
        let mut coverage_history = Vec::with_capacity(config.n_iterations);
        let mut cancelled = false;
        let mut timed_out = false;
        let mut iterations = 0usize;

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

            let placements = sample_placements(problem, &reach, &pheromone, config, seed, iteration);

            // Highest coverage, first-encountered on ties.
            let mut iter_best = &placements[0];
            for p in &placements[1..] {
                if p.coverage > iter_best.coverage {
                    iter_best = p;
                }
            }

            let amount = iter_best.coverage / 100.0;
            for (k, &i) in iter_best.sites.iter().enumerate() {
                for &j in &iter_best.sites[k + 1..] {
                    pheromone.deposit(i, j, amount);
                }
            }
            pheromone.evaporate(config.decay);

            if best
                .as_ref()
                .is_none_or(|b| iter_best.coverage > b.coverage)
            {
                best = Some(iter_best.clone());
            }
            let current = best.clone().unwrap_or_else(|| iter_best.clone());

            tracing::debug!(
                event = "iteration",
                iteration,
                iteration_best = iter_best.coverage,
                best = current.coverage,
            );

            coverage_history.push(current.coverage);
            observer.on_iteration(&CoverageIterationResult {
                iteration,
                iteration_best_coverage: iter_best.coverage,
                best: current,
            });
            iterations += 1;
        }

        let best = best.unwrap_or_else(|| Placement {
            sites: Vec::new(),
            coverage: 0.0,
        });

        tracing::info!(
            event = "solve_end",
            iterations,
            best_coverage = best.coverage,
            cancelled,
            timed_out,
            duration_ms = elapsed_ms(start),
        );

        Ok(CoverageResult {
            best,
            iterations,
            seed,
            cancelled,
            timed_out,
            coverage_history,
        })
    }
}

/// Samples one placement per ant against the current pheromone state.
fn sample_placements(
    problem: &CoverageProblem,
    reach: &[bool],
    pheromone: &PheromoneMatrix,
    config: &CoverageConfig,
    seed: u64,
    iteration: usize,
) -> Vec<Placement> {
    let sample = |ant: usize| {
        let mut rng = ant_rng(seed, iteration, ant);
        build_placement(problem, reach, pheromone, config.alpha, &mut rng)
    };

    #[cfg(feature = "parallel")]
    if config.parallel {
        return (0..config.n_ants).into_par_iter().map(sample).collect();
    }

    (0..config.n_ants).map(sample).collect()
}

fn build_placement<R: Rng>(
    problem: &CoverageProblem,
    reach: &[bool],
    pheromone: &PheromoneMatrix,
    alpha: f64,
    rng: &mut R,
) -> Placement {
    let m = problem.size();
    let k = problem.placements();

    let mut remaining: Vec<usize> = (0..m).collect();
    let mut sites = Vec::with_capacity(k);
    sites.push(remaining.swap_remove(rng.random_range(0..m)));

    let mut weights = Vec::with_capacity(m);
    while sites.len() < k {
        weights.clear();
        weights.extend(remaining.iter().map(|&c| {
            let mean = sites.iter().map(|&s| pheromone.get(c, s)).sum::<f64>() / sites.len() as f64;
            mean.powf(alpha)
        }));
        let pick = roulette_select(&weights, rng).unwrap_or(0);
        sites.push(remaining.swap_remove(pick));
    }
    sites.sort_unstable();

    let covered = (0..m)
        .filter(|&t| sites.iter().any(|&a| reach[a * m + t]))
        .count();
    Placement {
        sites,
        coverage: covered as f64 / m as f64 * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::Point;
    use crate::error::AcoError;
    use std::sync::mpsc;

    /// Four tight clusters far apart; one antenna per cluster covers all.
    fn clustered() -> CoverageProblem {
        let centers = [(0.0, 0.0), (100.0, 0.0), (0.0, 100.0), (100.0, 100.0)];
        let mut points = Vec::new();
        for &(cx, cy) in &centers {
            for k in 0..5 {
                let a = k as f64 * std::f64::consts::TAU / 5.0;
                points.push(Point::new(cx + 2.0 * a.cos(), cy + 2.0 * a.sin()));
            }
        }
        CoverageProblem::new(points).with_radius(5.0).with_antennas(4)
    }

    #[test]
    fn test_finds_full_coverage() {
        let problem = clustered();
        let config = CoverageConfig::default()
            .with_n_ants(20)
            .with_n_iterations(50)
            .with_seed(42);

        let result = CoverageRunner::run(&problem, &config).unwrap();

        assert!(
            (result.best.coverage - 100.0).abs() < 1e-9,
            "expected full coverage, got {}",
            result.best.coverage
        );
        assert_eq!(result.best.sites.len(), 4);
        assert!((problem.coverage(&result.best.sites) - result.best.coverage).abs() < 1e-9);
    }

    #[test]
    fn test_sites_are_distinct_and_sorted() {
        let problem = clustered().with_antennas(7);
        let config = CoverageConfig::default().with_n_iterations(5).with_seed(3);
        let mut seen = Vec::new();
        CoverageRunner::run_with_observer(&problem, &config, &mut |e: &CoverageIterationResult| {
            seen.push(e.best.sites.clone())
        })
        .unwrap();
        for sites in seen {
            assert_eq!(sites.len(), 7);
            assert!(sites.windows(2).all(|w| w[0] < w[1]), "{sites:?}");
        }
    }

    #[test]
    fn test_antennas_clamped_to_points() {
        let problem = CoverageProblem::new(vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)])
            .with_radius(1.0)
            .with_antennas(10);
        let result =
            CoverageRunner::run(&problem, &CoverageConfig::default().with_seed(0)).unwrap();
        assert_eq!(result.best.sites, vec![0, 1]);
        assert!((result.best.coverage - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_history_non_decreasing() {
        let problem = clustered().with_antennas(2);
        let config = CoverageConfig::default().with_n_iterations(30).with_seed(9);
        let result = CoverageRunner::run(&problem, &config).unwrap();
        assert_eq!(result.coverage_history.len(), 30);
        for w in result.coverage_history.windows(2) {
            assert!(w[1] >= w[0]);
        }
        // Two antennas reach at most two of four clusters.
        assert!(result.best.coverage <= 50.0 + 1e-9);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let problem = clustered().with_antennas(3);
        let config = CoverageConfig::default().with_n_iterations(20).with_seed(77);
        let (mut tx_a, rx_a) = mpsc::channel();
        let (mut tx_b, rx_b) = mpsc::channel();
        let a = CoverageRunner::run_with_observer(&problem, &config, &mut tx_a).unwrap();
        let b = CoverageRunner::run_with_observer(&problem, &config, &mut tx_b).unwrap();
        drop((tx_a, tx_b));
        assert_eq!(a, b);
        assert_eq!(rx_a.iter().collect::<Vec<_>>(), rx_b.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_invalid_inputs() {
        let config = CoverageConfig::default();
        let err = CoverageRunner::run(&CoverageProblem::new(vec![]), &config).unwrap_err();
        assert!(err.is_invalid_input());

        let err = CoverageRunner::run(&clustered(), &config.clone().with_decay(1.0)).unwrap_err();
        assert!(matches!(err, AcoError::InvalidParameter { name: "decay", .. }));
    }

    #[test]
    fn test_cancellation() {
        let cancel = Arc::new(AtomicBool::new(true));
        let result = CoverageRunner::run_with_cancel(
            &clustered(),
            &CoverageConfig::default().with_n_iterations(100).with_seed(1),
            &mut (),
            Some(cancel),
        )
        .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 1);
    }
}
