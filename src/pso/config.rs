//! PSO configuration.

use crate::error::{check_positive, check_probability, Result};

/// Configuration for [`ParticleSwarm`](super::ParticleSwarm).
///
/// Velocities are swap sequences. The three coefficients are the
/// probabilities with which each swap of the corresponding component is
/// kept when a particle's velocity is rebuilt.
///
/// # Examples
///
/// ```
/// use tsp_approx::pso::PsoConfig;
///
/// let config = PsoConfig::default()
///     .with_swarm_size(40)
///     .with_iterations(200)
///     .with_social(0.8)
///     .with_seed(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles.
    pub swarm_size: usize,

    /// Iteration budget; one iteration per step.
    pub iterations: usize,

    /// Probability of keeping each swap of the previous velocity (0.0–1.0).
    pub inertia: f64,

    /// Probability of keeping each swap toward the particle's own best (0.0–1.0).
    pub cognitive: f64,

    /// Probability of keeping each swap toward the swarm's best (0.0–1.0).
    pub social: f64,

    /// Maximum swaps applied per move. 0 = number of cities.
    pub max_velocity: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            swarm_size: 30,
            iterations: 500,
            inertia: 0.5,
            cognitive: 0.7,
            social: 0.9,
            max_velocity: 0,
            seed: None,
        }
    }
}

impl PsoConfig {
    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_inertia(mut self, p: f64) -> Self {
        self.inertia = p;
        self
    }

    pub fn with_cognitive(mut self, p: f64) -> Self {
        self.cognitive = p;
        self
    }

    pub fn with_social(mut self, p: f64) -> Self {
        self.social = p;
        self
    }

    pub fn with_max_velocity(mut self, n: usize) -> Self {
        self.max_velocity = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        check_positive("swarm_size", self.swarm_size)?;
        check_positive("iterations", self.iterations)?;
        check_probability("inertia", self.inertia)?;
        check_probability("cognitive", self.cognitive)?;
        check_probability("social", self.social)?;
        Ok(())
    }
}
