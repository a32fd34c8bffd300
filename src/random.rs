//! Seedable randomness for reproducible colony runs.
//!
//! Every run owns a single seed. Each ant draws from its own sub-stream
//! whose seed is derived from `(run seed, iteration, ant index)`, so a run
//! produces identical results whether ants are built sequentially or in
//! parallel.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The concrete generator used by all runners.
pub type RandomSource = ChaCha8Rng;

/// Creates a generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> RandomSource {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draws a fresh run seed from the thread-local entropy source.
pub fn random_seed() -> u64 {
    rand::random()
}

/// Derives the seed of one ant's sub-stream.
///
/// The mapping is a pure function of its inputs; distinct `(iteration, ant)`
/// pairs yield well-separated seeds.
pub fn derive_seed(run_seed: u64, iteration: usize, ant: usize) -> u64 {
    let mut z = splitmix64(run_seed);
    z = splitmix64(z ^ iteration as u64);
    splitmix64(z ^ (ant as u64).rotate_left(32))
}

/// Creates the generator for one ant's sub-stream.
pub fn ant_rng(run_seed: u64, iteration: usize, ant: usize) -> RandomSource {
    create_rng(derive_seed(run_seed, iteration, ant))
}

/// SplitMix64 finalizer (Steele, Lea & Flood 2014).
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Roulette wheel selection over non-negative weights.
///
/// Returns `None` only when `weights` is empty. Degenerate inputs are
/// recovered rather than rejected:
///
/// - NaN and negative weights count as zero;
/// - if some weights are infinite, one of them is picked uniformly;
/// - if every weight is zero, the pick is uniform over all entries.
pub fn roulette_select<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let sanitize = |w: f64| if w.is_nan() || w < 0.0 { 0.0 } else { w };

    let infinite: Vec<usize> = weights
        .iter()
        .enumerate()
        .filter(|&(_, &w)| w == f64::INFINITY)
        .map(|(i, _)| i)
        .collect();
    if !infinite.is_empty() {
        tracing::trace!(count = infinite.len(), "roulette: infinite weights");
        return Some(infinite[rng.random_range(0..infinite.len())]);
    }

    let total: f64 = weights.iter().map(|&w| sanitize(w)).sum();
    if total <= 0.0 || !total.is_finite() {
        tracing::trace!(total, "roulette: degenerate weights, sampling uniformly");
        return Some(rng.random_range(0..weights.len()));
    }

    let mut roll = rng.random_range(0.0..total);
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        let w = sanitize(w);
        if w <= 0.0 {
            continue;
        }
        last_positive = i;
        if roll < w {
            return Some(i);
        }
        roll -= w;
    }
    // Rounding can leave a sliver of `roll` past the last bucket.
    Some(last_positive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rng_reproducible() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..16 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_derive_seed_is_pure_and_spread() {
        assert_eq!(derive_seed(42, 3, 5), derive_seed(42, 3, 5));
        assert_ne!(derive_seed(42, 3, 5), derive_seed(42, 5, 3));
        assert_ne!(derive_seed(42, 0, 0), derive_seed(43, 0, 0));
        assert_ne!(derive_seed(42, 0, 1), derive_seed(42, 1, 0));
    }

    #[test]
    fn test_roulette_empty() {
        let mut rng = create_rng(1);
        assert_eq!(roulette_select(&[], &mut rng), None);
    }

    #[test]
    fn test_roulette_skips_zero_weights() {
        let mut rng = create_rng(1);
        for _ in 0..200 {
            let idx = roulette_select(&[0.0, 3.0, 0.0], &mut rng).unwrap();
            assert_eq!(idx, 1);
        }
    }

    #[test]
    fn test_roulette_all_zero_is_uniform() {
        let mut rng = create_rng(9);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[roulette_select(&[0.0; 4], &mut rng).unwrap()] += 1;
        }
        for &c in &counts {
            assert!(c > 800, "expected roughly uniform counts, got {counts:?}");
        }
    }

    #[test]
    fn test_roulette_infinite_weight_dominates() {
        let mut rng = create_rng(3);
        for _ in 0..100 {
            let idx = roulette_select(&[1.0, f64::INFINITY, 5.0], &mut rng).unwrap();
            assert_eq!(idx, 1);
        }
    }

    #[test]
    fn test_roulette_nan_counts_as_zero() {
        let mut rng = create_rng(3);
        for _ in 0..100 {
            let idx = roulette_select(&[f64::NAN, 2.0], &mut rng).unwrap();
            assert_eq!(idx, 1);
        }
    }

    #[test]
    fn test_roulette_proportional() {
        let mut rng = create_rng(11);
        let mut hits = 0usize;
        let trials = 10_000;
        for _ in 0..trials {
            if roulette_select(&[1.0, 3.0], &mut rng) == Some(1) {
                hits += 1;
            }
        }
        let ratio = hits as f64 / trials as f64;
        assert!(
            (ratio - 0.75).abs() < 0.03,
            "expected ~0.75 selection ratio, got {ratio}"
        );
    }
}
