//! Error types.
//!
//! Every strategy validates its inputs once, at construction. Reaching a
//! termination condition is not an error: it is reported through
//! [`StepReport::finished`](crate::optimizer::StepReport::finished).

use thiserror::Error;

/// Result alias used by all fallible constructors in this crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Invalid hyperparameters or degenerate city input.
///
/// Raised by constructors and `validate()` methods. Never recovered
/// internally: a caller holding this error must not proceed to step a
/// strategy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Fewer than two cities were supplied; no meaningful tour exists.
    #[error("at least 2 cities are required, got {0}")]
    TooFewCities(usize),

    /// A city has a NaN or infinite coordinate.
    #[error("city {index} has non-finite coordinates ({x}, {y})")]
    NonFiniteCity {
        /// Position of the offending city in the input.
        index: usize,
        /// Its x coordinate.
        x: f64,
        /// Its y coordinate.
        y: f64,
    },

    /// A numeric parameter lies outside its documented range.
    #[error("{name} must be {expected}, got {value}")]
    OutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Human-readable description of the valid range.
        expected: &'static str,
        /// The rejected value, formatted.
        value: String,
    },

    /// Elites would fill the whole population.
    #[error("elite_size ({elite}) must be less than population_size ({population})")]
    EliteTooLarge {
        /// Requested elite size.
        elite: usize,
        /// Requested population size.
        population: usize,
    },

    /// Exhaustive enumeration was requested on too many cities.
    #[error("brute force is limited to {limit} cities, got {count}")]
    TooManyCities {
        /// Number of cities supplied.
        count: usize,
        /// Configured upper bound.
        limit: usize,
    },

    /// The nearest-neighbor start index does not name a city.
    #[error("start city {start} is out of range for {count} cities")]
    StartOutOfRange {
        /// Requested start index.
        start: usize,
        /// Number of cities.
        count: usize,
    },

    /// A hyperparameter grid dimension has no candidate values.
    #[error("grid dimension `{0}` has no candidate values")]
    EmptyGridDimension(&'static str),
}

impl ConfigError {
    /// Shorthand for [`ConfigError::OutOfRange`].
    pub(crate) fn out_of_range(
        name: &'static str,
        expected: &'static str,
        value: impl std::fmt::Display,
    ) -> Self {
        ConfigError::OutOfRange {
            name,
            expected,
            value: value.to_string(),
        }
    }
}

/// Checks that `value` is a probability in `[0, 1]`.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(name, "in [0, 1]", value))
    }
}

/// Checks that `value` is at least one.
pub(crate) fn check_positive(name: &'static str, value: usize) -> Result<()> {
    if value >= 1 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(name, "at least 1", value))
    }
}
