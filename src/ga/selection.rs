//! Parent selection.
//!
//! Every scheme reads the population's tour lengths (shorter is better)
//! and returns the index of one parent.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use crate::fitness::fitness_of;
use rand::Rng;

/// How parents are drawn from the ranked population.
///
/// # Examples
///
/// ```
/// use tsp_approx::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default().with_selection(Selection::Tournament(3));
/// assert!(config.validate().is_ok());
/// assert_eq!(Selection::default(), Selection::Roulette);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Shortest of `k` uniformly drawn individuals. Larger `k` means
    /// stronger pressure toward the current best.
    Tournament(usize),

    /// Probability proportional to fitness `1 / length`.
    #[default]
    Roulette,

    /// Linear ranking: the `r`-th shortest tour (from 0) has weight `n - r`.
    /// Equal lengths are ranked by index.
    Rank,
}

impl Selection {
    /// Draws one parent index.
    ///
    /// # Panics
    /// Panics if `distances` is empty.
    pub fn select<R: Rng>(&self, distances: &[f64], rng: &mut R) -> usize {
        assert!(!distances.is_empty(), "cannot select from empty population");
        if distances.len() == 1 {
            return 0;
        }

        match *self {
            Selection::Tournament(k) => tournament(distances, k, rng),
            Selection::Roulette => roulette(distances, rng),
            Selection::Rank => rank(distances, rng),
        }
    }
}

fn tournament<R: Rng>(distances: &[f64], k: usize, rng: &mut R) -> usize {
    let n = distances.len();
    (0..k.max(1))
        .map(|_| rng.random_range(0..n))
        .reduce(|best, idx| if distances[idx] < distances[best] { idx } else { best })
        .unwrap_or(0)
}

fn roulette<R: Rng>(distances: &[f64], rng: &mut R) -> usize {
    let weights: Vec<f64> = distances.iter().map(|&d| fitness_of(d)).collect();

    // A zero-length tour cannot be beaten.
    if let Some(i) = weights.iter().position(|w| w.is_infinite()) {
        return i;
    }

    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return rng.random_range(0..distances.len());
    }
    spin(weights.iter().copied().enumerate(), total, rng)
}

fn rank<R: Rng>(distances: &[f64], rng: &mut R) -> usize {
    let n = distances.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]).then(a.cmp(&b)));

    let total = (n * (n + 1)) as f64 / 2.0;
    let weighted = order
        .iter()
        .enumerate()
        .map(|(r, &idx)| (idx, (n - r) as f64));
    spin(weighted, total, rng)
}

/// Draws from `(index, weight)` pairs whose weights sum to `total`.
/// Rounding that overshoots the last pair returns the last index.
fn spin<R, I>(weighted: I, total: f64, rng: &mut R) -> usize
where
    R: Rng,
    I: Iterator<Item = (usize, f64)>,
{
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last = 0;
    for (idx, weight) in weighted {
        cumulative += weight;
        last = idx;
        if cumulative > threshold {
            return idx;
        }
    }
    last
}
