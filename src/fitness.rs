//! Memoized tour evaluation.

use crate::tour::CityMap;
use rustc_hash::FxHashMap;

/// Maps a visiting order to its closed-tour length.
///
/// Scoped to a single strategy instance. Entries are only ever added: under
/// a fixed [`CityMap`] a given order always has the same length.
#[derive(Debug, Default, Clone)]
pub struct FitnessCache {
    lengths: FxHashMap<Box<[usize]>, f64>,
    hits: usize,
    misses: usize,
}

impl FitnessCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tour length, computed on first request and cached afterwards.
    pub fn distance(&mut self, map: &CityMap, tour: &[usize]) -> f64 {
        if let Some(&d) = self.lengths.get(tour) {
            self.hits += 1;
            return d;
        }
        self.misses += 1;
        let d = map.tour_length(tour);
        self.lengths.insert(tour.into(), d);
        d
    }

    /// Fitness is the inverse of tour length: higher is better.
    pub fn fitness(&mut self, map: &CityMap, tour: &[usize]) -> f64 {
        fitness_of(self.distance(map, tour))
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Number of distinct tours evaluated.
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

/// Converts a tour length to fitness (`1 / distance`).
///
/// A zero-length tour (all cities coincide) has infinite fitness.
pub fn fitness_of(distance: f64) -> f64 {
    if distance > 0.0 {
        1.0 / distance
    } else {
        f64::INFINITY
    }
}
