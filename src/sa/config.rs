//! SA configuration and cooling schedules.

use crate::error::{ConfigError, Result};

/// How the temperature falls after each step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// `T' = alpha * T`.
    Geometric {
        /// Multiplier in (0, 1); closer to 1 anneals longer.
        alpha: f64,
    },

    /// `T_k = T_0 - k * (T_0 - T_min) / steps`, reaching the floor after
    /// exactly `steps` steps.
    Linear {
        steps: usize,
    },

    /// `T' = T / (1 + beta * T)` (Lundy & Mees, 1986). Drops quickly while
    /// hot and slowly near the floor.
    LundyMees {
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.995 }
    }
}

/// Configuration for [`SimulatedAnnealing`](super::SimulatedAnnealing).
///
/// # Examples
///
/// ```
/// use tsp_approx::sa::{SaConfig, CoolingSchedule};
///
/// let config = SaConfig::default()
///     .with_cooling(CoolingSchedule::LundyMees { beta: 0.01 })
///     .with_iterations_per_temperature(20)
///     .with_max_iterations(50_000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// Temperature floor. The run finishes once T drops to or below it.
    pub min_temperature: f64,

    /// Cooling schedule, applied once per step.
    pub cooling: CoolingSchedule,

    /// Perturbations proposed per step (per temperature level).
    pub iterations_per_temperature: usize,

    /// Maximum total perturbations (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 1e-3,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 1,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return Err(ConfigError::out_of_range(
                "initial_temperature",
                "positive and finite",
                self.initial_temperature,
            ));
        }
        if !(self.min_temperature > 0.0) {
            return Err(ConfigError::out_of_range(
                "min_temperature",
                "positive",
                self.min_temperature,
            ));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(ConfigError::out_of_range(
                "min_temperature",
                "less than initial_temperature",
                self.min_temperature,
            ));
        }
        if self.iterations_per_temperature == 0 {
            return Err(ConfigError::out_of_range(
                "iterations_per_temperature",
                "at least 1",
                0,
            ));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(ConfigError::out_of_range("alpha", "in (0, 1)", alpha));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if !(beta > 0.0 && beta.is_finite()) {
                    return Err(ConfigError::out_of_range("beta", "positive", beta));
                }
            }
            CoolingSchedule::Linear { steps } => {
                if steps == 0 {
                    return Err(ConfigError::out_of_range("steps", "at least 1", steps));
                }
            }
        }
        Ok(())
    }
}
