//! Dense symmetric pheromone matrix.

/// Desirability weights between pairs of nodes, stored row-major.
///
/// Every entry starts at `1/n`. Entries change only through
/// [`deposit`](Self::deposit) (additive, applied to both directions) and
/// [`evaporate`](Self::evaporate) (multiplicative over the whole matrix),
/// so the matrix stays symmetric under any sequence of valid calls.
///
/// No upper or lower bound is enforced: over very long runs with little
/// evaporation, reinforced entries grow without limit.
///
/// # Examples
///
/// ```
/// use u_antcolony::pheromone::PheromoneMatrix;
///
/// let mut tau = PheromoneMatrix::new(4);
/// assert!((tau.get(0, 1) - 0.25).abs() < 1e-12);
///
/// tau.deposit(0, 1, 0.5);
/// tau.evaporate(0.5);
/// assert!((tau.get(1, 0) - 0.375).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMatrix {
    /// Creates an `n`×`n` matrix with every entry set to `1/n`.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "pheromone matrix needs at least one node");
        Self {
            data: vec![1.0 / n as f64; n * n],
            size: n,
        }
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current weight of edge `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    /// Adds `amount` to both `(i, j)` and `(j, i)`.
    ///
    /// For `i == j` the diagonal entry receives `amount` once per direction.
    pub fn deposit(&mut self, i: usize, j: usize, amount: f64) {
        debug_assert!(amount >= 0.0, "deposits reinforce only, got {amount}");
        self.data[i * self.size + j] += amount;
        self.data[j * self.size + i] += amount;
    }

    /// Deposits `amount` on every consecutive edge of `path`.
    pub fn deposit_path(&mut self, path: &[usize], amount: f64) {
        for w in path.windows(2) {
            self.deposit(w[0], w[1], amount);
        }
    }

    /// Multiplies every entry by `decay`.
    pub fn evaporate(&mut self, decay: f64) {
        debug_assert!((0.0..1.0).contains(&decay), "decay must be in [0, 1)");
        for v in &mut self.data {
            *v *= decay;
        }
    }

    /// Returns `true` if `get(i, j) == get(j, i)` for all pairs.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Row-major view of all entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
