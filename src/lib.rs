//! Anytime heuristics for the Euclidean Traveling Salesman Problem.
//!
//! Every strategy advances in small, bounded [`step`](AnytimeOptimizer::step)s
//! and reports the best closed-tour length found so far, so a caller can
//! interleave search with rendering or stop at any time:
//!
//! - **Constructive**: nearest neighbor, greedy edge matching, greedy
//!   followed by 2-opt, and exhaustive brute force for small inputs.
//! - **Simulated Annealing (SA)**: segment-reversal moves under a
//!   pluggable cooling schedule.
//! - **Particle Swarm (PSO)**: swap-sequence velocities over permutations.
//! - **Ant Colony (ACO)**: pheromone-guided probabilistic construction.
//! - **Genetic Algorithm (GA)**: elitist generational search with
//!   permutation crossover and a memoized fitness cache.
//! - **Cross-validation**: grid search over GA hyperparameters ranked by
//!   cumulative fitness.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use tsp_approx::{random::create_rng, random_cities, AnytimeOptimizer, CityMap};
//! use tsp_approx::{Strategy, StrategyConfig, StrategyKind};
//!
//! let mut rng = create_rng(42);
//! let map = Arc::new(CityMap::new(random_cities(25, 200.0, &mut rng)).unwrap());
//!
//! let config = StrategyConfig::default_for(StrategyKind::GreedyTwoOpt);
//! let mut strategy = Strategy::new(Arc::clone(&map), config).unwrap();
//! while !strategy.step().finished {
//!     // draw map.route(strategy.best_tour()) here
//! }
//! assert!(strategy.best_distance().is_finite());
//! ```
//!
//! # Architecture
//!
//! Strategies share a read-only [`CityMap`] through `Arc` and own
//! everything else: their generator, their fitness cache, their
//! [`RunState`]. Independent runs can therefore proceed on separate
//! threads without synchronization.

pub mod aco;
pub mod constructive;
pub mod cv;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod geometry;
pub mod optimizer;
pub mod pso;
pub mod random;
pub mod sa;
pub mod strategy;
pub mod tour;

pub use error::{ConfigError, Result};
pub use fitness::{fitness_of, FitnessCache};
pub use geometry::{random_cities, City};
pub use optimizer::{AnytimeOptimizer, Phase, RunState, StepReport};
pub use strategy::{Strategy, StrategyConfig, StrategyKind};
pub use tour::{is_permutation, CityMap};
