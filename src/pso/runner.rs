//! Stepwise discrete PSO engine.

use super::config::PsoConfig;
use crate::error::Result;
use crate::fitness::FitnessCache;
use crate::optimizer::{AnytimeOptimizer, RunState, StepReport};
use crate::random::{random_permutation, rng_from, TourRng};
use crate::strategy::StrategyKind;
use crate::tour::CityMap;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, trace};

/// A swap of two tour positions.
pub type Swap = (usize, usize);

/// One candidate tour with its swap-sequence velocity and personal best.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec<usize>,
    pub distance: f64,
    pub velocity: Vec<Swap>,
    pub best_position: Vec<usize>,
    pub best_distance: f64,
}

/// Particle swarm optimization adapted to permutations.
///
/// Each step rebuilds every particle's velocity from three components
/// (previous velocity, swaps toward its own best, swaps toward the swarm
/// best), keeping each swap with the configured probability, applies it,
/// and re-evaluates. A particle whose new velocity is empty takes one
/// random swap instead, so a collapsed swarm keeps exploring.
///
/// Reference: Wang, Huang, Zhou & Pang (2003), "Particle Swarm
/// Optimization for Traveling Salesman Problem"
#[derive(Debug, Clone)]
pub struct ParticleSwarm {
    map: Arc<CityMap>,
    config: PsoConfig,
    rng: TourRng,
    particles: Vec<Particle>,
    cache: FitnessCache,
    iteration: usize,
    state: RunState,
}

impl ParticleSwarm {
    pub fn new(map: Arc<CityMap>, config: PsoConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = rng_from(config.seed);
        let mut cache = FitnessCache::new();
        let mut state = RunState::new();

        let particles: Vec<Particle> = (0..config.swarm_size)
            .map(|_| {
                let position = random_permutation(map.len(), &mut rng);
                let distance = cache.distance(&map, &position);
                state.offer(&position, distance);
                Particle {
                    best_position: position.clone(),
                    best_distance: distance,
                    position,
                    distance,
                    velocity: Vec::new(),
                }
            })
            .collect();

        debug!(
            cities = map.len(),
            swarm_size = config.swarm_size,
            iterations = config.iterations,
            "particle swarm initialized"
        );

        Ok(Self {
            map,
            config,
            rng,
            particles,
            cache,
            iteration: 0,
            state,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Iterations completed.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    fn max_velocity(&self) -> usize {
        match self.config.max_velocity {
            0 => self.map.len(),
            v => v,
        }
    }

    fn next_velocity(&mut self, index: usize, global_best: &[usize]) -> Vec<Swap> {
        let particle = &self.particles[index];
        let toward_own = swap_sequence(&particle.position, &particle.best_position);
        let toward_swarm = swap_sequence(&particle.position, global_best);

        let mut velocity = Vec::new();
        for (swaps, keep) in [
            (&particle.velocity, self.config.inertia),
            (&toward_own, self.config.cognitive),
            (&toward_swarm, self.config.social),
        ] {
            velocity.extend(swaps.iter().copied().filter(|_| self.rng.random_bool(keep)));
        }
        velocity.truncate(self.max_velocity());

        if velocity.is_empty() {
            let n = self.map.len();
            velocity.push((self.rng.random_range(0..n), self.rng.random_range(0..n)));
        }
        velocity
    }
}

impl AnytimeOptimizer for ParticleSwarm {
    fn name(&self) -> &'static str {
        StrategyKind::ParticleSwarm.label()
    }

    fn step(&mut self) -> StepReport {
        if self.state.is_finished() {
            return self.state.report();
        }
        self.state.begin_step();

        let global_best = self.state.best_tour().to_vec();
        for index in 0..self.particles.len() {
            let velocity = self.next_velocity(index, &global_best);
            let particle = &mut self.particles[index];
            apply_swaps(&mut particle.position, &velocity);
            particle.velocity = velocity;
            particle.distance = self.cache.distance(&self.map, &particle.position);

            if particle.distance < particle.best_distance {
                particle.best_distance = particle.distance;
                particle.best_position.clone_from(&particle.position);
            }
            self.state.offer(&particle.position, particle.distance);
        }

        self.iteration += 1;
        trace!(
            iteration = self.iteration,
            best = self.state.best_distance(),
            "swarm moved"
        );

        if self.iteration >= self.config.iterations {
            self.state.finish();
            debug!(
                distance = self.state.best_distance(),
                iterations = self.iteration,
                cached = self.cache.len(),
                "particle swarm finished"
            );
        }

        self.state.report()
    }

    fn state(&self) -> &RunState {
        &self.state
    }
}

/// Swaps that, applied in order, turn `from` into `to`.
///
/// Both slices must be permutations of the same set.
pub fn swap_sequence(from: &[usize], to: &[usize]) -> Vec<Swap> {
    let n = from.len();
    let mut current = from.to_vec();
    let mut position = vec![0; n];
    for (i, &city) in current.iter().enumerate() {
        position[city] = i;
    }

    let mut swaps = Vec::new();
    for i in 0..n {
        if current[i] != to[i] {
            let j = position[to[i]];
            let (a, b) = (current[i], current[j]);
            current.swap(i, j);
            position[a] = j;
            position[b] = i;
            swaps.push((i, j));
        }
    }
    swaps
}

/// Applies `swaps` to `tour` in order.
pub fn apply_swaps(tour: &mut [usize], swaps: &[Swap]) {
    for &(i, j) in swaps {
        tour.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::random_cities;
    use crate::random::create_rng;
    use crate::tour::is_permutation;

    fn random_map(n: usize, seed: u64) -> Arc<CityMap> {
        let mut rng = create_rng(seed);
        Arc::new(CityMap::new(random_cities(n, 100.0, &mut rng)).unwrap())
    }

    #[test]
    fn test_swap_sequence_transforms() {
        let from = vec![3, 0, 4, 1, 2];
        let to = vec![0, 1, 2, 3, 4];
        let swaps = swap_sequence(&from, &to);
        let mut tour = from.clone();
        apply_swaps(&mut tour, &swaps);
        assert_eq!(tour, to);
        assert!(swaps.len() < from.len());
    }

    #[test]
    fn test_swap_sequence_identity_is_empty() {
        let p = vec![2, 0, 1];
        assert!(swap_sequence(&p, &p).is_empty());
    }

    #[test]
    fn test_particles_stay_permutations() {
        let config = PsoConfig::default()
            .with_swarm_size(10)
            .with_iterations(30)
            .with_seed(4);
        let mut pso = ParticleSwarm::new(random_map(12, 4), config).unwrap();
        while !pso.step().finished {
            for p in pso.particles() {
                assert!(is_permutation(&p.position, 12));
                assert!(is_permutation(&p.best_position, 12));
                assert!(p.velocity.len() <= 12);
                assert!(p.best_distance <= p.distance);
            }
        }
        assert_eq!(pso.iteration(), 30);
    }

    #[test]
    fn test_monotone_best() {
        let config = PsoConfig::default()
            .with_swarm_size(15)
            .with_iterations(80)
            .with_seed(10);
        let mut pso = ParticleSwarm::new(random_map(15, 10), config).unwrap();
        let initial = pso.best_distance();
        let mut last = initial;
        loop {
            let report = pso.step();
            assert!(report.best_distance <= last);
            last = report.best_distance;
            if report.finished {
                break;
            }
        }
        assert!(last <= initial);
    }

    #[test]
    fn test_max_velocity_caps_moves() {
        let config = PsoConfig::default()
            .with_swarm_size(5)
            .with_iterations(10)
            .with_max_velocity(2)
            .with_seed(2);
        let mut pso = ParticleSwarm::new(random_map(20, 2), config).unwrap();
        pso.run_to_completion();
        assert!(pso.particles().iter().all(|p| p.velocity.len() <= 2));
    }
}
