//! Deterministic tour construction and exhaustive search.
//!
//! - [`NearestNeighbor`]: walk to the closest unvisited city, one per step
//! - [`Greedy`]: commit the shortest feasible edge, one per step
//! - [`GreedyTwoOpt`]: greedy tour refined by 2-opt, one candidate per step
//! - [`BruteForce`]: every tour from a fixed first city, one per step
//!
//! None of these consume randomness.
//!
//! # References
//!
//! - Rosenkrantz, Stearns & Lewis (1977), "An Analysis of Several Heuristics
//!   for the Traveling Salesman Problem"
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"

mod brute_force;
mod config;
mod greedy;
mod nearest_neighbor;
mod two_opt;

pub use brute_force::BruteForce;
pub use config::{BruteForceConfig, GreedyConfig, NearestNeighborConfig, TwoOptConfig};
pub use greedy::Greedy;
pub use nearest_neighbor::NearestNeighbor;
pub use two_opt::GreedyTwoOpt;
