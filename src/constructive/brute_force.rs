//! Exhaustive enumeration.

use super::config::BruteForceConfig;
use crate::error::Result;
use crate::optimizer::{AnytimeOptimizer, RunState, StepReport};
use crate::strategy::StrategyKind;
use crate::tour::CityMap;
use std::sync::Arc;
use tracing::debug;

/// Evaluates every tour that starts at city 0.
///
/// Fixing the first city removes rotations, leaving `(n - 1)!` orders,
/// visited in lexicographic order. One step evaluates one order. The only
/// exact strategy in the crate, bounded by [`BruteForceConfig::max_cities`].
#[derive(Debug, Clone)]
pub struct BruteForce {
    map: Arc<CityMap>,
    tour: Vec<usize>,
    evaluated: u64,
    state: RunState,
}

impl BruteForce {
    pub fn new(map: Arc<CityMap>, config: BruteForceConfig) -> Result<Self> {
        config.validate_for(map.len())?;
        let tour: Vec<usize> = (0..map.len()).collect();

        debug!(
            cities = map.len(),
            permutations = permutation_count(map.len()),
            "brute force initialized"
        );

        Ok(Self {
            map,
            tour,
            evaluated: 0,
            state: RunState::new(),
        })
    }

    /// Tours evaluated so far.
    pub fn evaluated(&self) -> u64 {
        self.evaluated
    }

    /// Total number of tours this instance will evaluate.
    pub fn total(&self) -> u64 {
        permutation_count(self.map.len())
    }
}

impl AnytimeOptimizer for BruteForce {
    fn name(&self) -> &'static str {
        StrategyKind::BruteForce.label()
    }

    fn step(&mut self) -> StepReport {
        if self.state.is_finished() {
            return self.state.report();
        }
        self.state.begin_step();

        let distance = self.map.tour_length(&self.tour);
        self.state.offer(&self.tour, distance);
        self.evaluated += 1;

        if !next_permutation(&mut self.tour[1..]) {
            self.state.finish();
            debug!(
                distance = self.state.best_distance(),
                evaluated = self.evaluated,
                "brute force finished"
            );
        }

        self.state.report()
    }

    fn state(&self) -> &RunState {
        &self.state
    }
}

/// `(n - 1)!`, saturating at `u64::MAX`.
fn permutation_count(n: usize) -> u64 {
    (1..n as u64).fold(1u64, |acc, k| acc.saturating_mul(k))
}

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns `false` (leaving `items` untouched) when `items` is already the
/// last permutation.
fn next_permutation(items: &mut [usize]) -> bool {
    let n = items.len();
    if n < 2 {
        return false;
    }
    let Some(pivot) = (0..n - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        return false;
    };
    let successor = (pivot + 1..n)
        .rev()
        .find(|&j| items[j] > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
