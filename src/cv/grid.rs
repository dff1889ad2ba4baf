//! Hyperparameter grid for the genetic strategy.

use crate::error::{ConfigError, Result};
use crate::ga::GaConfig;
use itertools::iproduct;

/// One point of a [`ParamGrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaParams {
    pub population_size: usize,
    pub elite_size: usize,
    pub mutation_rate: f64,
    pub generations: usize,
}

impl GaParams {
    /// Applies these parameters on top of `base`, keeping its selection,
    /// crossover and seed.
    pub fn apply(&self, base: &GaConfig) -> GaConfig {
        GaConfig {
            population_size: self.population_size,
            elite_size: self.elite_size,
            mutation_rate: self.mutation_rate,
            generations: self.generations,
            ..base.clone()
        }
    }
}

/// Candidate values for each searched GA parameter.
///
/// The grid is the Cartesian product of the four lists, enumerated with
/// population size varying slowest and generations fastest.
///
/// # Examples
///
/// ```
/// use tsp_approx::cv::ParamGrid;
/// use tsp_approx::ga::GaConfig;
///
/// let grid = ParamGrid::new(vec![50, 100], vec![5, 10], vec![0.001, 0.01], vec![100]);
/// assert_eq!(grid.len(), 8);
/// assert!(grid.validate(&GaConfig::default()).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamGrid {
    pub population_size: Vec<usize>,
    pub elite_size: Vec<usize>,
    pub mutation_rate: Vec<f64>,
    pub generations: Vec<usize>,
}

impl ParamGrid {
    pub fn new(
        population_size: Vec<usize>,
        elite_size: Vec<usize>,
        mutation_rate: Vec<f64>,
        generations: Vec<usize>,
    ) -> Self {
        Self {
            population_size,
            elite_size,
            mutation_rate,
            generations,
        }
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.population_size.len()
            * self.elite_size.len()
            * self.mutation_rate.len()
            * self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every combination, in enumeration order.
    pub fn points(&self) -> Vec<GaParams> {
        iproduct!(
            self.population_size.iter().copied(),
            self.elite_size.iter().copied(),
            self.mutation_rate.iter().copied(),
            self.generations.iter().copied()
        )
        .map(
            |(population_size, elite_size, mutation_rate, generations)| GaParams {
                population_size,
                elite_size,
                mutation_rate,
                generations,
            },
        )
        .collect()
    }

    /// Rejects empty dimensions and any combination that would not build a
    /// valid [`GaConfig`] on top of `base`, so no run starts on a grid that
    /// fails midway.
    pub fn validate(&self, base: &GaConfig) -> Result<()> {
        let dimensions = [
            ("population_size", self.population_size.is_empty()),
            ("elite_size", self.elite_size.is_empty()),
            ("mutation_rate", self.mutation_rate.is_empty()),
            ("generations", self.generations.is_empty()),
        ];
        if let Some((name, _)) = dimensions.into_iter().find(|&(_, empty)| empty) {
            return Err(ConfigError::EmptyGridDimension(name));
        }

        self.points()
            .iter()
            .try_for_each(|params| params.apply(base).validate())
    }
}
