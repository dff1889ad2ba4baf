//! Ant Colony Optimization (ACO).
//!
//! Ant System: probabilistic tour construction biased by pheromone trails
//! and inverse distance, followed by global deposit and evaporation.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod config;
mod runner;

pub use config::AcoConfig;
pub use runner::AntColony;
