//! Value types shared by the TSP colony: cities, tours and events.

use crate::error::{AcoError, Result};

/// A city with a fixed index and planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// Position of this city in the input sequence.
    pub id: usize,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl City {
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A closed tour over `n` cities, stored as `n + 1` indices.
///
/// Invariants: `path[0] == path[n]` and `path[..n]` is a permutation of
/// `0..n`. Tours built by the colony satisfy them by construction;
/// [`Path::new`] checks them for caller-supplied sequences.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path(Vec<usize>);

impl Path {
    /// Validates and wraps a closed tour.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidInput`] if the sequence is shorter than 3 entries,
    /// is not closed, or does not visit every city exactly once.
    pub fn new(nodes: Vec<usize>) -> Result<Self> {
        if nodes.len() < 3 {
            return Err(AcoError::InvalidInput(format!(
                "a closed tour needs at least 3 entries, got {}",
                nodes.len()
            )));
        }
        let n = nodes.len() - 1;
        if nodes[0] != nodes[n] {
            return Err(AcoError::InvalidInput(format!(
                "tour is not closed: starts at {} and ends at {}",
                nodes[0], nodes[n]
            )));
        }
        let mut seen = vec![false; n];
        for &c in &nodes[..n] {
            if c >= n || seen[c] {
                return Err(AcoError::InvalidInput(format!(
                    "tour must visit each of {n} cities exactly once; offending entry {c}"
                )));
            }
            seen[c] = true;
        }
        Ok(Self(nodes))
    }

    /// Closes an open visiting order by appending its first city.
    pub(crate) fn close(mut order: Vec<usize>) -> Self {
        debug_assert!(!order.is_empty());
        let start = order[0];
        order.push(start);
        Self(order)
    }

    /// Number of distinct cities on the tour.
    pub fn city_count(&self) -> usize {
        self.0.len() - 1
    }

    /// First (and last) city.
    pub fn start(&self) -> usize {
        self.0[0]
    }

    /// Consecutive `(from, to)` pairs, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl AsRef<[usize]> for Path {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

/// One ant's tour together with its length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntSolution {
    pub path: Path,
    /// Sum of the `n` edge distances along `path`.
    pub length: f64,
}

/// Progress event emitted once per completed iteration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationResult {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Best tour found so far across all iterations.
    pub best_path: Path,
    /// Length of `best_path`.
    pub best_length: f64,
    /// Shortest tour length among this iteration's ants.
    pub iteration_best_length: f64,
    /// Mean tour length among this iteration's ants.
    pub iteration_mean_length: f64,
}
