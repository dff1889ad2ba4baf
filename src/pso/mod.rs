//! Particle Swarm Optimization (PSO) for permutations.
//!
//! Positions are tours, velocities are sequences of position swaps.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Clerc (2004), "Discrete Particle Swarm Optimization, illustrated by
//!   the Traveling Salesman Problem"

mod config;
mod runner;

pub use config::PsoConfig;
pub use runner::{apply_swaps, swap_sequence, Particle, ParticleSwarm, Swap};
