//! Validated city collections and tour evaluation.
//!
//! A tour is a `Vec<usize>` of city indices into a [`CityMap`]. Every tour
//! a strategy holds is a permutation of `0..n`; the length of a tour is
//! the sum of consecutive distances, wrapping from the last city back to
//! the first.

use crate::error::{ConfigError, Result};
use crate::geometry::City;

/// An immutable city collection with a precomputed distance matrix.
///
/// Created once at setup and shared read-only (usually behind an
/// [`Arc`](std::sync::Arc)) by every strategy that runs on it.
#[derive(Debug, Clone)]
pub struct CityMap {
    cities: Vec<City>,
    distances: Vec<f64>,
}

impl CityMap {
    /// Builds the map, rejecting fewer than two cities or non-finite
    /// coordinates.
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.len() < 2 {
            return Err(ConfigError::TooFewCities(cities.len()));
        }
        if let Some((index, city)) = cities.iter().enumerate().find(|(_, c)| !c.is_finite()) {
            return Err(ConfigError::NonFiniteCity {
                index,
                x: city.x,
                y: city.y,
            });
        }

        let n = cities.len();
        let mut distances = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }

        Ok(Self { cities, distances })
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`: a map holds at least two cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn city(&self, index: usize) -> City {
        self.cities[index]
    }

    /// Distance between cities `i` and `j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.cities.len() + j]
    }

    /// Length of the closed tour visiting `tour` in order.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        match tour {
            [] | [_] => 0.0,
            [first, .., last] => {
                let open: f64 = tour.windows(2).map(|w| self.distance(w[0], w[1])).sum();
                open + self.distance(*last, *first)
            }
        }
    }

    /// City coordinates in tour order, for rendering.
    pub fn route(&self, tour: &[usize]) -> Vec<City> {
        tour.iter().map(|&i| self.cities[i]).collect()
    }
}

/// Check that a slice is a valid permutation of `0..n`.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}
