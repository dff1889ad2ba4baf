//! Parameters of the genetic strategy.

use super::operators::Crossover;
use super::selection::Selection;
use crate::error::{check_positive, check_probability, ConfigError, Result};

/// Configuration for [`GeneticApproximation`](super::GeneticApproximation).
///
/// Defaults are 100 tours, 20 elites, mutation rate 0.01 and 500
/// generations, with roulette selection and order crossover.
///
/// ```
/// use tsp_approx::ga::{Crossover, GaConfig};
///
/// let config = GaConfig::new(150, 10, 0.001, 250)
///     .with_tournament_size(4)
///     .with_crossover(Crossover::PartiallyMapped);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Tours per generation.
    pub population_size: usize,

    /// Number of best individuals copied unchanged into the next generation.
    ///
    /// Must be at least 1 and less than `population_size`.
    pub elite_size: usize,

    /// Per-position probability of swapping a child's city with a random
    /// other position (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of generations; one generation per step.
    pub generations: usize,

    /// Parent selection scheme.
    pub selection: Selection,

    /// Recombination operator.
    pub crossover: Crossover,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            elite_size: 20,
            mutation_rate: 0.01,
            generations: 500,
            selection: Selection::default(),
            crossover: Crossover::default(),
            seed: None,
        }
    }
}

impl GaConfig {
    /// Positional constructor: population size, elite size, mutation rate,
    /// generation budget.
    pub fn new(
        population_size: usize,
        elite_size: usize,
        mutation_rate: f64,
        generations: usize,
    ) -> Self {
        Self {
            population_size,
            elite_size,
            mutation_rate,
            generations,
            ..Self::default()
        }
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Shorthand for `with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        check_positive("population_size", self.population_size)?;
        check_positive("elite_size", self.elite_size)?;
        if self.elite_size >= self.population_size {
            return Err(ConfigError::EliteTooLarge {
                elite: self.elite_size,
                population: self.population_size,
            });
        }
        check_probability("mutation_rate", self.mutation_rate)?;
        check_positive("generations", self.generations)?;
        if let Selection::Tournament(k) = self.selection {
            check_positive("tournament_size", k)?;
        }
        Ok(())
    }
}
