//! Stepwise SA engine.

use super::config::{CoolingSchedule, SaConfig};
use crate::error::Result;
use crate::optimizer::{AnytimeOptimizer, RunState, StepReport};
use crate::random::{random_permutation, random_segment, rng_from, TourRng};
use crate::strategy::StrategyKind;
use crate::tour::CityMap;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, trace};

/// Simulated annealing over segment reversals.
///
/// Starts from a random tour. Each step proposes
/// [`iterations_per_temperature`](SaConfig::iterations_per_temperature)
/// reversals at the current temperature, accepting improvements always and
/// worsening moves with probability `exp(-Δ / T)`, then cools once. The run
/// finishes when the temperature reaches the floor or the iteration budget
/// is spent.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    map: Arc<CityMap>,
    config: SaConfig,
    rng: TourRng,
    current: Vec<usize>,
    current_cost: f64,
    temperature: f64,
    temperature_step: usize,
    iterations: usize,
    accepted_moves: usize,
    improving_moves: usize,
    cost_history: Vec<f64>,
    state: RunState,
}

impl SimulatedAnnealing {
    pub fn new(map: Arc<CityMap>, config: SaConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = rng_from(config.seed);
        let current = random_permutation(map.len(), &mut rng);
        let current_cost = map.tour_length(&current);

        let mut state = RunState::new();
        state.offer(&current, current_cost);

        debug!(
            cities = map.len(),
            initial_temperature = config.initial_temperature,
            min_temperature = config.min_temperature,
            cooling = ?config.cooling,
            "simulated annealing initialized"
        );

        Ok(Self {
            temperature: config.initial_temperature,
            map,
            config,
            rng,
            current,
            current_cost,
            temperature_step: 0,
            iterations: 0,
            accepted_moves: 0,
            improving_moves: 0,
            cost_history: vec![current_cost],
            state,
        })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Tour the chain currently sits on (not necessarily the best).
    pub fn current_tour(&self) -> &[usize] {
        &self.current
    }

    /// Total perturbations proposed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of accepted moves (including improvements).
    pub fn accepted_moves(&self) -> usize {
        self.accepted_moves
    }

    /// Number of improving moves.
    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    /// Best cost after construction and after each step.
    pub fn cost_history(&self) -> &[f64] {
        &self.cost_history
    }

    fn budget_spent(&self) -> bool {
        self.config.max_iterations > 0 && self.iterations >= self.config.max_iterations
    }

    /// Length change from reversing `current[start..=end]`.
    fn reversal_delta(&self, start: usize, end: usize) -> f64 {
        let n = self.current.len();
        // Reversing all but at most one city leaves the cycle unchanged.
        if start == end || end - start + 1 >= n - 1 {
            return 0.0;
        }
        let before = self.current[(start + n - 1) % n];
        let after = self.current[(end + 1) % n];
        let (first, last) = (self.current[start], self.current[end]);
        self.map.distance(before, last) + self.map.distance(first, after)
            - self.map.distance(before, first)
            - self.map.distance(last, after)
    }

    fn perturb(&mut self) {
        let (start, end) = random_segment(self.current.len(), &mut self.rng);
        let delta = self.reversal_delta(start, end);

        // Metropolis acceptance criterion
        let accept = if delta < 0.0 {
            self.improving_moves += 1;
            true
        } else {
            let probability = (-delta / self.temperature).exp();
            self.rng.random_range(0.0..1.0) < probability
        };

        if accept {
            self.current[start..=end].reverse();
            self.current_cost += delta;
            self.accepted_moves += 1;

            if self.current_cost < self.state.best_distance() {
                // Resync to avoid drift from accumulated deltas.
                self.current_cost = self.map.tour_length(&self.current);
                self.state.offer(&self.current, self.current_cost);
            }
        }
        self.iterations += 1;
    }
}

impl AnytimeOptimizer for SimulatedAnnealing {
    fn name(&self) -> &'static str {
        StrategyKind::SimulatedAnnealing.label()
    }

    fn step(&mut self) -> StepReport {
        if self.state.is_finished() {
            return self.state.report();
        }
        self.state.begin_step();

        for _ in 0..self.config.iterations_per_temperature {
            if self.budget_spent() {
                break;
            }
            self.perturb();
        }

        self.temperature = cool(self.temperature, &self.config, self.temperature_step);
        self.temperature_step += 1;
        self.cost_history.push(self.state.best_distance());

        trace!(
            temperature = self.temperature,
            current = self.current_cost,
            best = self.state.best_distance(),
            "annealing step"
        );

        if self.temperature <= self.config.min_temperature || self.budget_spent() {
            self.state.finish();
            debug!(
                distance = self.state.best_distance(),
                iterations = self.iterations,
                accepted = self.accepted_moves,
                improving = self.improving_moves,
                "simulated annealing finished"
            );
        }

        self.state.report()
    }

    fn state(&self) -> &RunState {
        &self.state
    }
}

/// Apply the cooling schedule to compute the next temperature.
fn cool(temperature: f64, config: &SaConfig, step: usize) -> f64 {
    match config.cooling {
        CoolingSchedule::Geometric { alpha } => temperature * alpha,

        CoolingSchedule::Linear { steps } => {
            if step + 1 >= steps {
                return config.min_temperature;
            }
            let t = config.initial_temperature
                - (step + 1) as f64 * (config.initial_temperature - config.min_temperature)
                    / steps as f64;
            t.max(config.min_temperature)
        }

        CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{random_cities, City};
    use crate::random::create_rng;
    use crate::tour::is_permutation;

    fn random_map(n: usize, seed: u64) -> Arc<CityMap> {
        let mut rng = create_rng(seed);
        Arc::new(CityMap::new(random_cities(n, 100.0, &mut rng)).unwrap())
    }

    fn circle(n: usize) -> Arc<CityMap> {
        let cities = (0..n)
            .map(|k| {
                let angle = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
                City::new(50.0 * angle.cos(), 50.0 * angle.sin())
            })
            .collect();
        Arc::new(CityMap::new(cities).unwrap())
    }

    #[test]
    fn test_geometric_step_count() {
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(0.5)
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.9 })
            .with_seed(1);
        let mut sa = SimulatedAnnealing::new(random_map(10, 1), config).unwrap();
        sa.run_to_completion();
        // 0.9^7 = 0.478 is the first power at or below 0.5.
        assert_eq!(sa.state().steps(), 7);
        assert_eq!(sa.cost_history().len(), 8);
    }

    #[test]
    fn test_linear_cooling_reaches_floor() {
        let config = SaConfig::default()
            .with_cooling(CoolingSchedule::Linear { steps: 50 })
            .with_seed(3);
        let mut sa = SimulatedAnnealing::new(random_map(12, 3), config).unwrap();
        sa.run_to_completion();
        assert_eq!(sa.state().steps(), 50);
        assert!((sa.temperature() - 1e-3).abs() < 1e-12);
    }

    #[test]
    fn test_reversal_delta_matches_recompute() {
        let config = SaConfig::default().with_seed(9);
        let sa = SimulatedAnnealing::new(random_map(9, 9), config).unwrap();
        let base = sa.map.tour_length(&sa.current);
        for start in 0..9 {
            for end in start..9 {
                let mut tour = sa.current.clone();
                tour[start..=end].reverse();
                let expected = sa.map.tour_length(&tour) - base;
                let delta = sa.reversal_delta(start, end);
                assert!(
                    (delta - expected).abs() < 1e-9,
                    "segment [{start}, {end}]: delta {delta}, expected {expected}"
                );
            }
        }
    }

    #[test]
    fn test_improves_on_circle() {
        let map = circle(20);
        let optimum = map.tour_length(&(0..20).collect::<Vec<_>>());
        let config = SaConfig::default()
            .with_initial_temperature(50.0)
            .with_min_temperature(0.01)
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.98 })
            .with_iterations_per_temperature(200)
            .with_seed(42);
        let mut sa = SimulatedAnnealing::new(map, config).unwrap();
        let initial = sa.best_distance();
        let report = sa.run_to_completion();

        assert!(report.best_distance < initial);
        assert!(
            report.best_distance < optimum * 1.1,
            "expected within 10% of {optimum}, got {}",
            report.best_distance
        );
        assert!(sa.improving_moves() > 0);
        assert!(sa.accepted_moves() >= sa.improving_moves());
        assert!(is_permutation(sa.current_tour(), 20));
        assert!(is_permutation(sa.best_tour(), 20));
    }

    #[test]
    fn test_chain_stays_a_permutation() {
        let config = SaConfig::default()
            .with_iterations_per_temperature(5)
            .with_max_iterations(400)
            .with_seed(13);
        let mut sa = SimulatedAnnealing::new(random_map(11, 13), config).unwrap();
        assert!(is_permutation(sa.current_tour(), 11));
        while !sa.step().finished {
            assert!(is_permutation(sa.current_tour(), 11));
            assert!(is_permutation(sa.best_tour(), 11));
            let drift = sa.current_cost - sa.map.tour_length(&sa.current);
            assert!(drift.abs() < 1e-6);
        }
    }

    #[test]
    fn test_max_iterations_limit() {
        let config = SaConfig::default()
            .with_initial_temperature(1e10)
            .with_min_temperature(1e-15)
            .with_iterations_per_temperature(10)
            .with_max_iterations(95)
            .with_seed(42);
        let mut sa = SimulatedAnnealing::new(random_map(10, 2), config).unwrap();
        sa.run_to_completion();
        assert_eq!(sa.iterations(), 95);
        assert_eq!(sa.state().steps(), 10);
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let config = SaConfig::default()
            .with_iterations_per_temperature(20)
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.95 })
            .with_seed(4);
        let mut sa = SimulatedAnnealing::new(random_map(15, 4), config).unwrap();
        sa.run_to_completion();
        for window in sa.cost_history().windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_metropolis_accepts_uphill_when_hot() {
        let config = SaConfig::default()
            .with_initial_temperature(1e8)
            .with_min_temperature(1e7)
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.99 })
            .with_iterations_per_temperature(100)
            .with_seed(42);
        let mut sa = SimulatedAnnealing::new(random_map(10, 8), config).unwrap();
        sa.run_to_completion();
        let acceptance_ratio = sa.accepted_moves() as f64 / sa.iterations() as f64;
        assert!(
            acceptance_ratio > 0.95,
            "expected high acceptance at high temp, got {acceptance_ratio}"
        );
    }
}
