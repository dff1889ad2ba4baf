//! Genetic Algorithm over tours.
//!
//! An elitist, generational GA specialised to permutation encodings. Each
//! call to [`step`](crate::AnytimeOptimizer::step) advances one generation.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, elites, mutation, budget)
//! - [`GeneticApproximation`]: Stepwise evolutionary loop
//! - [`Selection`]: Parent selection (roulette, tournament, rank)
//! - [`Crossover`]: Permutation-preserving recombination (OX, PMX)
//!
//! # Submodules
//!
//! - [`operators`]: Permutation crossover (OX, PMX) and swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod operators;
mod runner;
mod selection;

pub use config::GaConfig;
pub use operators::Crossover;
pub use runner::GeneticApproximation;
pub use selection::Selection;
