//! ACO configuration.

use crate::error::{check_positive, check_probability, ConfigError, Result};

/// Configuration for [`AntColony`](super::AntColony).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants constructing a tour per iteration.
    pub ants: usize,

    /// Iteration budget; one iteration per step.
    pub iterations: usize,

    /// Pheromone exponent.
    pub alpha: f64,

    /// Heuristic (inverse distance) exponent.
    pub beta: f64,

    /// Fraction of pheromone lost per iteration (0.0–1.0).
    pub evaporation: f64,

    /// Pheromone deposited by one ant, divided by its tour length.
    pub deposit: f64,

    /// Pheromone on every edge before the first iteration.
    pub initial_pheromone: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ants: 20,
            iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            evaporation: 0.1,
            deposit: 100.0,
            initial_pheromone: 1.0,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_ants(mut self, n: usize) -> Self {
        self.ants = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_evaporation(mut self, rate: f64) -> Self {
        self.evaporation = rate;
        self
    }

    pub fn with_deposit(mut self, q: f64) -> Self {
        self.deposit = q;
        self
    }

    pub fn with_initial_pheromone(mut self, tau0: f64) -> Self {
        self.initial_pheromone = tau0;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        check_positive("ants", self.ants)?;
        check_positive("iterations", self.iterations)?;
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::out_of_range(
                    name,
                    "non-negative and finite",
                    value,
                ));
            }
        }
        check_probability("evaporation", self.evaporation)?;
        for (name, value) in [
            ("deposit", self.deposit),
            ("initial_pheromone", self.initial_pheromone),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::out_of_range(name, "positive and finite", value));
            }
        }
        Ok(())
    }
}
