//! Probabilistic tour construction for a single ant.

use super::distance::DistanceMatrix;
use super::types::{AntSolution, Path};
use crate::pheromone::PheromoneMatrix;
use crate::random::roulette_select;
use rand::Rng;

/// Heuristic weight used in place of `1/d` when two distinct cities share
/// coordinates (`d == 0`).
pub const ZERO_DISTANCE_HEURISTIC: f64 = 1e12;

/// Builds one candidate tour from a read-only view of the colony state.
///
/// The next city is drawn with probability proportional to
///
/// ```text
/// w(c) = tau(current, c)^alpha * (1 / d(current, c))^beta
/// ```
///
/// over the cities not yet visited. When every weight vanishes the draw is
/// uniform over the unvisited set.
///
/// # References
///
/// Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a Colony
/// of Cooperating Agents"
#[derive(Debug, Clone, Copy)]
pub struct AntPathBuilder<'a> {
    distances: &'a DistanceMatrix,
    pheromone: &'a PheromoneMatrix,
    alpha: f64,
    beta: f64,
}

impl<'a> AntPathBuilder<'a> {
    /// # Panics
    ///
    /// Panics if the two matrices disagree on the number of cities.
    pub fn new(
        distances: &'a DistanceMatrix,
        pheromone: &'a PheromoneMatrix,
        alpha: f64,
        beta: f64,
    ) -> Self {
        assert_eq!(
            distances.size(),
            pheromone.size(),
            "distance and pheromone matrices must have the same size"
        );
        Self {
            distances,
            pheromone,
            alpha,
            beta,
        }
    }

    /// Constructs one closed tour and measures it.
    pub fn build<R: Rng>(&self, rng: &mut R) -> AntSolution {
        let n = self.distances.size();
        let start = rng.random_range(0..n);

        let mut order = Vec::with_capacity(n + 1);
        order.push(start);
        let mut unvisited: Vec<usize> = (0..n).filter(|&c| c != start).collect();
        let mut weights = Vec::with_capacity(n);

        let mut current = start;
        while !unvisited.is_empty() {
            weights.clear();
            weights.extend(unvisited.iter().map(|&c| self.weight(current, c)));

            // `roulette_select` only returns `None` for an empty slice.
            let pick = roulette_select(&weights, rng).unwrap_or(0);
            current = unvisited.remove(pick);
            order.push(current);
        }

        let path = Path::close(order);
        let length = self.distances.tour_length(&path);
        AntSolution { path, length }
    }

    /// Selection weight for moving from `from` to `to`.
    fn weight(&self, from: usize, to: usize) -> f64 {
        let tau = self.pheromone.get(from, to).powf(self.alpha);
        let d = self.distances.get(from, to);
        let eta = if d > 0.0 {
            1.0 / d
        } else {
            ZERO_DISTANCE_HEURISTIC
        };
        tau * eta.powf(self.beta)
    }
}
