//! Hyperparameter tuning by exhaustive grid search.
//!
//! [`GridSearch`] sweeps a [`ParamGrid`] of genetic-strategy parameters,
//! runs every point several times, and ranks points by cumulative fitness
//! (the sum of `1 / best_distance` over every generation). Points that
//! converge early to short tours score highest. [`run_trials`] is the
//! underlying repeated-run primitive and accepts any strategy.

mod grid;
mod harness;

pub use grid::{GaParams, ParamGrid};
pub use harness::{run_trials, CvResult, GridSearch, TrialSummary};
