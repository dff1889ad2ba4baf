//! GA evolutionary loop, one generation per step.
//!
//! [`GeneticApproximation`] advances the evolutionary process one
//! generation at a time:
//! evaluation → ranking → elitism → selection → crossover → mutation.

use super::config::GaConfig;
use super::operators::swap_mutation;
use crate::error::Result;
use crate::fitness::FitnessCache;
use crate::optimizer::{AnytimeOptimizer, RunState, StepReport};
use crate::random::{random_permutation, rng_from, TourRng};
use crate::strategy::StrategyKind;
use crate::tour::CityMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Elitist genetic algorithm over tours.
///
/// The initial population is random permutations. Each step ranks the
/// population by tour length, carries the `elite_size` best tours over
/// unchanged, and fills the rest with mutated offspring of selected
/// parents. Elitism makes the best length non-increasing across
/// generations.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use tsp_approx::{AnytimeOptimizer, City, CityMap};
/// use tsp_approx::ga::{GaConfig, GeneticApproximation};
///
/// let cities = (0..12)
///     .map(|i| City::new((i * 7 % 12) as f64, (i * 5 % 12) as f64))
///     .collect();
/// let map = Arc::new(CityMap::new(cities).unwrap());
/// let config = GaConfig::new(30, 5, 0.01, 40).with_seed(42);
/// let mut ga = GeneticApproximation::new(map, config).unwrap();
///
/// let report = ga.run_to_completion();
/// assert!(report.finished);
/// assert_eq!(ga.generation(), 40);
/// ```
#[derive(Debug, Clone)]
pub struct GeneticApproximation {
    map: Arc<CityMap>,
    config: GaConfig,
    rng: TourRng,
    population: Vec<Vec<usize>>,
    distances: Vec<f64>,
    cache: FitnessCache,
    generation: usize,
    fitness_history: Vec<f64>,
    state: RunState,
}

impl GeneticApproximation {
    pub fn new(map: Arc<CityMap>, config: GaConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = rng_from(config.seed);

        // 1. Initialize population
        let population: Vec<Vec<usize>> = (0..config.population_size)
            .map(|_| random_permutation(map.len(), &mut rng))
            .collect();

        debug!(
            cities = map.len(),
            population_size = config.population_size,
            elite_size = config.elite_size,
            mutation_rate = config.mutation_rate,
            generations = config.generations,
            selection = ?config.selection,
            "genetic approximation initialized"
        );

        let mut ga = Self {
            map,
            config,
            rng,
            population,
            distances: Vec::new(),
            cache: FitnessCache::new(),
            generation: 0,
            fitness_history: Vec::new(),
            state: RunState::new(),
        };

        // 2. Evaluate initial population and track best
        ga.evaluate_population();
        ga.fitness_history.push(ga.state.best_distance());
        Ok(ga)
    }

    /// Generations completed.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &[Vec<usize>] {
        &self.population
    }

    /// Tour length of each individual, aligned with [`population`](Self::population).
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Best length for the initial population and after each generation.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    pub fn cache(&self) -> &FitnessCache {
        &self.cache
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Evaluates every individual through the cache and offers the
    /// generation's best to the run state.
    fn evaluate_population(&mut self) {
        let map = &self.map;
        let cache = &mut self.cache;
        self.distances = self
            .population
            .iter()
            .map(|tour| cache.distance(map, tour))
            .collect();

        if let Some((best_idx, &best)) = self
            .distances
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
        {
            self.state.offer(&self.population[best_idx], best);
        }
    }

    /// Population indices sorted by tour length, best first.
    fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.population.len()).collect();
        order.sort_by(|&a, &b| {
            self.distances[a]
                .total_cmp(&self.distances[b])
                .then(a.cmp(&b))
        });
        order
    }

    fn breed(&mut self) -> Vec<usize> {
        let p1 = self.config.selection.select(&self.distances, &mut self.rng);
        let p2 = self.config.selection.select(&self.distances, &mut self.rng);
        let mut child =
            self.config
                .crossover
                .apply(&self.population[p1], &self.population[p2], &mut self.rng);
        swap_mutation(&mut child, self.config.mutation_rate, &mut self.rng);
        child
    }
}

impl AnytimeOptimizer for GeneticApproximation {
    fn name(&self) -> &'static str {
        StrategyKind::Genetic.label()
    }

    fn step(&mut self) -> StepReport {
        if self.state.is_finished() {
            return self.state.report();
        }
        self.state.begin_step();

        // Elite preservation
        let ranking = self.ranking();
        let mut next_gen: Vec<Vec<usize>> = Vec::with_capacity(self.config.population_size);
        next_gen.extend(
            ranking[..self.config.elite_size]
                .iter()
                .map(|&i| self.population[i].clone()),
        );

        // Generate offspring
        while next_gen.len() < self.config.population_size {
            let child = self.breed();
            next_gen.push(child);
        }

        self.population = next_gen;
        self.evaluate_population();
        self.generation += 1;
        self.fitness_history.push(self.state.best_distance());

        trace!(
            generation = self.generation,
            best = self.state.best_distance(),
            cached = self.cache.len(),
            "generation complete"
        );

        if self.generation >= self.config.generations {
            self.state.finish();
            debug!(
                distance = self.state.best_distance(),
                generations = self.generation,
                cache_hits = self.cache.hits(),
                cache_misses = self.cache.misses(),
                "genetic approximation finished"
            );
        }

        self.state.report()
    }

    fn state(&self) -> &RunState {
        &self.state
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{Crossover, Selection};
    use crate::geometry::{random_cities, City};
    use crate::random::create_rng;
    use crate::tour::is_permutation;

    fn random_map(n: usize, seed: u64) -> Arc<CityMap> {
        let mut rng = create_rng(seed);
        Arc::new(CityMap::new(random_cities(n, 200.0, &mut rng)).unwrap())
    }

    #[test]
    fn test_one_generation_per_step() {
        let config = GaConfig::new(20, 4, 0.01, 15).with_seed(1);
        let mut ga = GeneticApproximation::new(random_map(15, 1), config).unwrap();

        for gen in 1..=15 {
            let report = ga.step();
            assert_eq!(ga.generation(), gen);
            assert_eq!(report.finished, gen == 15);
        }
        // History has generations + 1 entries (initial + each gen)
        assert_eq!(ga.fitness_history().len(), 16);
    }

    #[test]
    fn test_elite_preservation() {
        let config = GaConfig::new(30, 5, 0.05, 60).with_seed(42);
        let mut ga = GeneticApproximation::new(random_map(20, 2), config).unwrap();
        ga.run_to_completion();

        for window in ga.fitness_history().windows(2) {
            assert!(
                window[1] <= window[0],
                "fitness should be monotonically non-increasing with elitism: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_elites_survive_unchanged() {
        let config = GaConfig::new(12, 3, 1.0, 5).with_seed(9);
        let mut ga = GeneticApproximation::new(random_map(10, 9), config).unwrap();

        let ranking = ga.ranking();
        let elites: Vec<Vec<usize>> = ranking[..3].iter().map(|&i| ga.population[i].clone()).collect();
        ga.step();
        assert_eq!(&ga.population()[..3], elites.as_slice());
    }

    #[test]
    fn test_population_stays_valid() {
        for crossover in [Crossover::Order, Crossover::PartiallyMapped] {
            let config = GaConfig::new(25, 5, 0.2, 20)
                .with_crossover(crossover)
                .with_seed(5);
            let mut ga = GeneticApproximation::new(random_map(12, 5), config).unwrap();
            while !ga.step().finished {
                assert_eq!(ga.population().len(), 25);
                assert!(ga.population().iter().all(|t| is_permutation(t, 12)));
            }
        }
    }

    #[test]
    fn test_improves_over_random() {
        let config = GaConfig::new(100, 20, 0.01, 200).with_seed(42);
        let mut ga = GeneticApproximation::new(random_map(15, 3), config).unwrap();
        let initial = ga.best_distance();
        let report = ga.run_to_completion();
        assert!(
            report.best_distance < initial * 0.8,
            "expected at least 20% improvement over {initial}, got {}",
            report.best_distance
        );
    }

    #[test]
    fn test_all_selection_strategies() {
        for selection in [Selection::Tournament(3), Selection::Roulette, Selection::Rank] {
            let config = GaConfig::new(30, 5, 0.02, 30)
                .with_selection(selection)
                .with_seed(42);
            let mut ga = GeneticApproximation::new(random_map(10, 4), config).unwrap();
            let initial = ga.best_distance();
            let report = ga.run_to_completion();
            assert!(report.best_distance <= initial, "{selection:?}");
        }
    }

    #[test]
    fn test_cache_hits_on_elites() {
        let config = GaConfig::new(20, 10, 0.0, 10).with_seed(8);
        let mut ga = GeneticApproximation::new(random_map(8, 8), config).unwrap();
        ga.run_to_completion();
        // Every elite re-evaluation is a cache hit.
        assert!(ga.cache().hits() >= 10 * 10);
    }

    #[test]
    fn test_deterministic_under_seed() {
        let map = random_map(14, 6);
        let run = |map: Arc<CityMap>| {
            let config = GaConfig::new(20, 4, 0.05, 25).with_seed(123);
            let mut ga = GeneticApproximation::new(map, config).unwrap();
            let mut reports = Vec::new();
            loop {
                let r = ga.step();
                reports.push(r);
                if r.finished {
                    break reports;
                }
            }
        };
        assert_eq!(run(Arc::clone(&map)), run(map));
    }

    #[test]
    fn test_two_cities() {
        let map = Arc::new(CityMap::new(vec![City::new(0.0, 0.0), City::new(0.0, 5.0)]).unwrap());
        let mut ga = GeneticApproximation::new(map, GaConfig::new(4, 1, 0.5, 3).with_seed(1)).unwrap();
        let report = ga.run_to_completion();
        assert!((report.best_distance - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GaConfig::new(10, 10, 0.01, 10);
        assert!(GeneticApproximation::new(random_map(5, 1), config).is_err());
    }
}
