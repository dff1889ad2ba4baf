//! Configuration for the constructive and exhaustive strategies.

use crate::error::{check_positive, ConfigError, Result};

/// Configuration for [`NearestNeighbor`](super::NearestNeighbor).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearestNeighborConfig {
    /// Index of the city the tour starts from.
    pub start: usize,
}

impl NearestNeighborConfig {
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    /// Checks the start index against the number of cities.
    pub fn validate_for(&self, city_count: usize) -> Result<()> {
        if self.start >= city_count {
            return Err(ConfigError::StartOutOfRange {
                start: self.start,
                count: city_count,
            });
        }
        Ok(())
    }
}

/// Configuration for [`Greedy`](super::Greedy). The edge-greedy
/// construction has no tunable parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreedyConfig;

/// Configuration for [`GreedyTwoOpt`](super::GreedyTwoOpt).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptConfig {
    /// Minimum length reduction for a swap to count as improving.
    ///
    /// Guards against cycling on floating-point noise.
    pub epsilon: f64,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self { epsilon: 1e-9 }
    }
}

impl TwoOptConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon >= 0.0 && self.epsilon.is_finite()) {
            return Err(ConfigError::out_of_range(
                "epsilon",
                "finite and non-negative",
                self.epsilon,
            ));
        }
        Ok(())
    }
}

/// Configuration for [`BruteForce`](super::BruteForce).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BruteForceConfig {
    /// Largest city count accepted. Work grows as `(n - 1)!`.
    pub max_cities: usize,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self { max_cities: 10 }
    }
}

impl BruteForceConfig {
    pub fn with_max_cities(mut self, max_cities: usize) -> Self {
        self.max_cities = max_cities;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_positive("max_cities", self.max_cities)
    }

    /// Checks the configured bound against the number of cities.
    pub fn validate_for(&self, city_count: usize) -> Result<()> {
        self.validate()?;
        if city_count > self.max_cities {
            return Err(ConfigError::TooManyCities {
                count: city_count,
                limit: self.max_cities,
            });
        }
        Ok(())
    }
}
