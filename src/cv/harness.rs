//! Repeated trials and grid-search cross-validation.

use super::grid::{GaParams, ParamGrid};
use crate::error::{check_positive, Result};
use crate::fitness::fitness_of;
use crate::ga::GaConfig;
use crate::optimizer::AnytimeOptimizer;
use crate::random::derive_seed;
use crate::strategy::{Strategy, StrategyConfig, StrategyKind};
use crate::tour::CityMap;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of running one strategy configuration several times.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSummary {
    pub kind: StrategyKind,

    /// Sum of `1 / best_distance` over every step of every repeat.
    pub cumulative_score: f64,

    /// Final best distance of each repeat.
    pub final_distances: Vec<f64>,

    /// Mean of [`final_distances`](Self::final_distances).
    pub avg_final_distance: f64,

    /// Steps taken across all repeats.
    pub steps: usize,

    /// Wall-clock time for all repeats.
    pub duration: Duration,
}

/// Runs `config` to completion `repeats` times on `map`.
///
/// With `seed`, repeat `r` runs under `derive_seed(seed, r)`, so the whole
/// summary except `duration` is reproducible. Without it, stochastic
/// configs use their own seed setting for every repeat.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tsp_approx::cv::run_trials;
/// use tsp_approx::{City, CityMap, StrategyConfig, StrategyKind};
///
/// let cities = (0..8).map(|i| City::new(i as f64, (i * i % 7) as f64)).collect();
/// let map = Arc::new(CityMap::new(cities).unwrap());
/// let config = StrategyConfig::default_for(StrategyKind::Greedy);
///
/// let summary = run_trials(&map, &config, 3, Some(1)).unwrap();
/// assert_eq!(summary.final_distances.len(), 3);
/// ```
pub fn run_trials(
    map: &Arc<CityMap>,
    config: &StrategyConfig,
    repeats: usize,
    seed: Option<u64>,
) -> Result<TrialSummary> {
    check_positive("repeats", repeats)?;

    let start = Instant::now();
    let mut cumulative_score = 0.0;
    let mut final_distances = Vec::with_capacity(repeats);
    let mut steps = 0;

    for repeat in 0..repeats {
        let run_config = match seed {
            Some(base) => config.clone().with_seed(derive_seed(base, repeat as u64)),
            None => config.clone(),
        };
        let mut strategy = Strategy::new(Arc::clone(map), run_config)?;
        loop {
            let report = strategy.step();
            cumulative_score += fitness_of(report.best_distance);
            steps += 1;
            if report.finished {
                final_distances.push(report.best_distance);
                break;
            }
        }
    }

    let avg_final_distance = final_distances.iter().sum::<f64>() / repeats as f64;
    let summary = TrialSummary {
        kind: config.kind(),
        cumulative_score,
        final_distances,
        avg_final_distance,
        steps,
        duration: start.elapsed(),
    };
    debug!(
        strategy = %summary.kind,
        repeats,
        score = summary.cumulative_score,
        avg_distance = summary.avg_final_distance,
        "trials complete"
    );
    Ok(summary)
}

/// Score of one grid point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CvResult {
    pub params: GaParams,

    /// Sum of per-generation `1 / best_distance` over all repeats.
    /// Higher is better.
    pub cumulative_score: f64,

    /// Mean final best distance over the repeats.
    pub avg_final_distance: f64,

    /// Wall-clock time for all repeats of this point.
    pub duration: Duration,
}

/// Exhaustive search over a [`ParamGrid`] for the genetic strategy.
///
/// Every grid point runs a fresh [`GeneticApproximation`] to completion
/// `repeats` times. Runs never share a generator or fitness cache.
///
/// [`GeneticApproximation`]: crate::ga::GeneticApproximation
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tsp_approx::cv::{GridSearch, ParamGrid};
/// use tsp_approx::{random::create_rng, random_cities, CityMap};
///
/// let mut rng = create_rng(0);
/// let map = Arc::new(CityMap::new(random_cities(10, 100.0, &mut rng)).unwrap());
///
/// let grid = ParamGrid::new(vec![20, 30], vec![2, 5], vec![0.01], vec![10]);
/// let results = GridSearch::new(grid).with_repeats(2).with_seed(7).fit(&map).unwrap();
///
/// assert_eq!(results.len(), 4);
/// assert!(results[0].cumulative_score >= results[3].cumulative_score);
/// ```
#[derive(Debug, Clone)]
pub struct GridSearch {
    grid: ParamGrid,
    base: GaConfig,
    repeats: usize,
    seed: Option<u64>,
    parallel: bool,
}

impl GridSearch {
    pub fn new(grid: ParamGrid) -> Self {
        Self {
            grid,
            base: GaConfig::default(),
            repeats: 5,
            seed: None,
            parallel: false,
        }
    }

    /// Selection, crossover and seed used for every grid point.
    pub fn with_base_config(mut self, base: GaConfig) -> Self {
        self.base = base;
        self
    }

    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }

    /// Base seed. Grid point `i` uses `derive_seed(seed, i)` as the base of
    /// its repeats.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Evaluates grid points on the rayon thread pool. Without the
    /// `parallel` feature the points run sequentially.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn grid(&self) -> &ParamGrid {
        &self.grid
    }

    /// Runs the search and returns one result per grid point, sorted by
    /// `cumulative_score` descending. Ties keep grid order.
    pub fn fit(&self, map: &Arc<CityMap>) -> Result<Vec<CvResult>> {
        self.grid.validate(&self.base)?;
        check_positive("repeats", self.repeats)?;

        let points: Vec<(usize, GaParams)> = self.grid.points().into_iter().enumerate().collect();
        info!(
            points = points.len(),
            repeats = self.repeats,
            cities = map.len(),
            parallel = self.parallel,
            "grid search started"
        );

        #[cfg(feature = "parallel")]
        let mut results = if self.parallel {
            points
                .par_iter()
                .map(|&(index, params)| self.evaluate(map, index, params))
                .collect::<Result<Vec<_>>>()?
        } else {
            self.evaluate_sequential(map, &points)?
        };
        #[cfg(not(feature = "parallel"))]
        let mut results = self.evaluate_sequential(map, &points)?;

        results.sort_by(|a, b| b.cumulative_score.total_cmp(&a.cumulative_score));
        Ok(results)
    }

    fn evaluate_sequential(
        &self,
        map: &Arc<CityMap>,
        points: &[(usize, GaParams)],
    ) -> Result<Vec<CvResult>> {
        points
            .iter()
            .map(|&(index, params)| self.evaluate(map, index, params))
            .collect()
    }

    fn evaluate(&self, map: &Arc<CityMap>, index: usize, params: GaParams) -> Result<CvResult> {
        let config = StrategyConfig::Genetic(params.apply(&self.base));
        let seed = self.seed.map(|base| derive_seed(base, index as u64));
        let summary = run_trials(map, &config, self.repeats, seed)?;

        info!(
            population_size = params.population_size,
            elite_size = params.elite_size,
            mutation_rate = params.mutation_rate,
            generations = params.generations,
            score = summary.cumulative_score,
            avg_distance = summary.avg_final_distance,
            duration_ms = summary.duration.as_millis() as u64,
            "grid point evaluated"
        );

        Ok(CvResult {
            params,
            cumulative_score: summary.cumulative_score,
            avg_final_distance: summary.avg_final_distance,
            duration: summary.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::geometry::random_cities;
    use crate::random::create_rng;

    fn random_map(n: usize, seed: u64) -> Arc<CityMap> {
        let mut rng = create_rng(seed);
        Arc::new(CityMap::new(random_cities(n, 200.0, &mut rng)).unwrap())
    }

    #[test]
    fn test_trials_count_steps() {
        let map = random_map(9, 1);
        let config = GaConfig::new(10, 2, 0.05, 6).into();
        let summary = run_trials(&map, &config, 3, Some(11)).unwrap();
        assert_eq!(summary.kind, StrategyKind::Genetic);
        assert_eq!(summary.final_distances.len(), 3);
        assert_eq!(summary.steps, 18);
        let mean = summary.final_distances.iter().sum::<f64>() / 3.0;
        assert!((summary.avg_final_distance - mean).abs() < 1e-9);
    }

    #[test]
    fn test_trials_score_deterministic_strategy() {
        // Nearest neighbor on 5 cities: 4 steps, only the last has a tour.
        let map = random_map(5, 2);
        let config = StrategyConfig::default_for(StrategyKind::NearestNeighbor);
        let summary = run_trials(&map, &config, 2, None).unwrap();
        assert_eq!(summary.steps, 8);
        let d = summary.final_distances[0];
        assert_eq!(summary.final_distances[1], d);
        assert!((summary.cumulative_score - 2.0 / d).abs() < 1e-12);
    }

    #[test]
    fn test_zero_repeats_rejected() {
        let map = random_map(5, 3);
        let config = StrategyConfig::default_for(StrategyKind::Greedy);
        assert!(matches!(
            run_trials(&map, &config, 0, None),
            Err(ConfigError::OutOfRange { name: "repeats", .. })
        ));
    }

    #[test]
    fn test_invalid_base_rejected_before_running() {
        let map = random_map(6, 7);
        let grid = ParamGrid::new(vec![10], vec![2], vec![0.01], vec![3]);
        for parallel in [false, true] {
            let search = GridSearch::new(grid.clone())
                .with_base_config(GaConfig::default().with_tournament_size(0))
                .with_parallel(parallel);
            assert!(matches!(
                search.fit(&map),
                Err(ConfigError::OutOfRange { name: "tournament_size", .. })
            ));
        }
    }

    #[test]
    fn test_fit_sorted_and_complete() {
        let map = random_map(10, 4);
        let grid = ParamGrid::new(vec![12, 20], vec![2, 4], vec![0.0, 0.05], vec![5, 8]);
        let results = GridSearch::new(grid.clone())
            .with_repeats(2)
            .with_seed(9)
            .fit(&map)
            .unwrap();

        assert_eq!(results.len(), grid.len());
        for window in results.windows(2) {
            assert!(window[0].cumulative_score >= window[1].cumulative_score);
        }
        for point in grid.points() {
            assert_eq!(results.iter().filter(|r| r.params == point).count(), 1);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let map = random_map(8, 5);
        let grid = ParamGrid::new(vec![10, 16], vec![2], vec![0.01, 0.1], vec![6]);
        let search = GridSearch::new(grid).with_repeats(2).with_seed(3);

        let strip = |results: Vec<CvResult>| -> Vec<(GaParams, f64, f64)> {
            results
                .into_iter()
                .map(|r| (r.params, r.cumulative_score, r.avg_final_distance))
                .collect()
        };
        let sequential = strip(search.fit(&map).unwrap());
        let parallel = strip(search.clone().with_parallel(true).fit(&map).unwrap());
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_invalid_grid_fails_before_running() {
        let map = random_map(6, 6);
        let grid = ParamGrid::new(vec![10], vec![10], vec![0.01], vec![5]);
        assert!(matches!(
            GridSearch::new(grid).fit(&map),
            Err(ConfigError::EliteTooLarge { .. })
        ));
    }
}
