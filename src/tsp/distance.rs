//! Dense distance matrix.

use super::types::{City, Path};
use crate::error::{AcoError, Result};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A dense n×n symmetric distance matrix stored in row-major order.
///
/// Built once and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use u_antcolony::tsp::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]).unwrap();
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes Euclidean distances between cities.
    ///
    /// City ids must match their positions in the slice.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidInput`] for fewer than 2 cities, mismatched ids,
    /// or non-finite coordinates.
    pub fn from_cities(cities: &[City]) -> Result<Self> {
        let n = cities.len();
        if n < 2 {
            return Err(AcoError::InvalidInput(format!(
                "need at least 2 cities, got {n}"
            )));
        }
        for (i, c) in cities.iter().enumerate() {
            if c.id != i {
                return Err(AcoError::InvalidInput(format!(
                    "city at position {i} has id {}",
                    c.id
                )));
            }
            if !c.x.is_finite() || !c.y.is_finite() {
                return Err(AcoError::InvalidInput(format!(
                    "city {i} has non-finite coordinates ({}, {})",
                    c.x, c.y
                )));
            }
        }

        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Ok(Self { data, size: n })
    }

    /// Computes Euclidean distances between `(x, y)` pairs, indexed in order.
    pub fn from_coordinates(points: &[(f64, f64)]) -> Result<Self> {
        let cities: Vec<City> = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| City::new(i, x, y))
            .collect();
        Self::from_cities(&cities)
    }

    /// Wraps an explicit row-major n×n matrix.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidInput`] if `size < 2`, the length is not
    /// `size * size`, an entry is negative or non-finite, a diagonal entry
    /// is non-zero, or the matrix is not symmetric.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if size < 2 {
            return Err(AcoError::InvalidInput(format!(
                "need at least 2 cities, got {size}"
            )));
        }
        if data.len() != size * size {
            return Err(AcoError::InvalidInput(format!(
                "expected {} entries for a {size}x{size} matrix, got {}",
                size * size,
                data.len()
            )));
        }
        if let Some(pos) = data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(AcoError::InvalidInput(format!(
                "distance ({}, {}) must be finite and non-negative, got {}",
                pos / size,
                pos % size,
                data[pos]
            )));
        }
        let dm = Self { data, size };
        if let Some(i) = (0..size).find(|&i| dm.get(i, i) != 0.0) {
            return Err(AcoError::InvalidInput(format!(
                "diagonal entry ({i}, {i}) must be zero, got {}",
                dm.get(i, i)
            )));
        }
        if !dm.is_symmetric(SYMMETRY_TOLERANCE) {
            return Err(AcoError::InvalidInput(
                "distance matrix must be symmetric".into(),
            ));
        }
        Ok(dm)
    }

    /// Distance between cities `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sum of consecutive edge distances along `path`.
    pub fn tour_length(&self, path: &Path) -> f64 {
        path.edges().map(|(a, b)| self.get(a, b)).sum()
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
