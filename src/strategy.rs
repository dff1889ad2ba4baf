//! Closed set of strategies behind one stepwise interface.
//!
//! [`StrategyKind`] names a strategy (with the menu labels a front end
//! shows), [`StrategyConfig`] carries its validated parameters, and
//! [`Strategy`] is the running instance dispatched by `match`.

use crate::aco::{AcoConfig, AntColony};
use crate::constructive::{
    BruteForce, BruteForceConfig, Greedy, GreedyConfig, GreedyTwoOpt, NearestNeighbor,
    NearestNeighborConfig, TwoOptConfig,
};
use crate::error::Result;
use crate::ga::{GaConfig, GeneticApproximation};
use crate::optimizer::{AnytimeOptimizer, RunState, StepReport};
use crate::pso::{ParticleSwarm, PsoConfig};
use crate::sa::{SaConfig, SimulatedAnnealing};
use crate::tour::CityMap;
use std::fmt;
use std::sync::Arc;

/// Identifies one of the available strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    NearestNeighbor,
    Greedy,
    GreedyTwoOpt,
    SimulatedAnnealing,
    ParticleSwarm,
    AntColony,
    Genetic,
    BruteForce,
}

impl StrategyKind {
    /// Every strategy, in menu order.
    pub const ALL: [StrategyKind; 8] = [
        StrategyKind::NearestNeighbor,
        StrategyKind::Greedy,
        StrategyKind::GreedyTwoOpt,
        StrategyKind::SimulatedAnnealing,
        StrategyKind::ParticleSwarm,
        StrategyKind::AntColony,
        StrategyKind::Genetic,
        StrategyKind::BruteForce,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::NearestNeighbor => "Nearest Neighbor",
            StrategyKind::Greedy => "Greedy",
            StrategyKind::GreedyTwoOpt => "2-Opt",
            StrategyKind::SimulatedAnnealing => "Simulated Annealing",
            StrategyKind::ParticleSwarm => "Particle Swarm",
            StrategyKind::AntColony => "Ant Colony",
            StrategyKind::Genetic => "Genetic",
            StrategyKind::BruteForce => "Brute Force",
        }
    }

    /// Looks a strategy up by menu label.
    ///
    /// Labels with no implementation behind them (such as `"3-Opt"`)
    /// return `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// Whether the strategy draws random numbers.
    pub fn is_stochastic(self) -> bool {
        matches!(
            self,
            StrategyKind::SimulatedAnnealing
                | StrategyKind::ParticleSwarm
                | StrategyKind::AntColony
                | StrategyKind::Genetic
        )
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters for one strategy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyConfig {
    NearestNeighbor(NearestNeighborConfig),
    Greedy(GreedyConfig),
    GreedyTwoOpt(TwoOptConfig),
    SimulatedAnnealing(SaConfig),
    ParticleSwarm(PsoConfig),
    AntColony(AcoConfig),
    Genetic(GaConfig),
    BruteForce(BruteForceConfig),
}

impl StrategyConfig {
    /// Default parameters for `kind`.
    pub fn default_for(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::NearestNeighbor => Self::NearestNeighbor(Default::default()),
            StrategyKind::Greedy => Self::Greedy(GreedyConfig),
            StrategyKind::GreedyTwoOpt => Self::GreedyTwoOpt(Default::default()),
            StrategyKind::SimulatedAnnealing => Self::SimulatedAnnealing(Default::default()),
            StrategyKind::ParticleSwarm => Self::ParticleSwarm(Default::default()),
            StrategyKind::AntColony => Self::AntColony(Default::default()),
            StrategyKind::Genetic => Self::Genetic(Default::default()),
            StrategyKind::BruteForce => Self::BruteForce(Default::default()),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::NearestNeighbor(_) => StrategyKind::NearestNeighbor,
            Self::Greedy(_) => StrategyKind::Greedy,
            Self::GreedyTwoOpt(_) => StrategyKind::GreedyTwoOpt,
            Self::SimulatedAnnealing(_) => StrategyKind::SimulatedAnnealing,
            Self::ParticleSwarm(_) => StrategyKind::ParticleSwarm,
            Self::AntColony(_) => StrategyKind::AntColony,
            Self::Genetic(_) => StrategyKind::Genetic,
            Self::BruteForce(_) => StrategyKind::BruteForce,
        }
    }

    /// Sets the seed of a stochastic strategy. Deterministic strategies
    /// are returned unchanged.
    pub fn with_seed(self, seed: u64) -> Self {
        match self {
            Self::SimulatedAnnealing(c) => Self::SimulatedAnnealing(c.with_seed(seed)),
            Self::ParticleSwarm(c) => Self::ParticleSwarm(c.with_seed(seed)),
            Self::AntColony(c) => Self::AntColony(c.with_seed(seed)),
            Self::Genetic(c) => Self::Genetic(c.with_seed(seed)),
            other => other,
        }
    }
}

impl From<GaConfig> for StrategyConfig {
    fn from(config: GaConfig) -> Self {
        Self::Genetic(config)
    }
}

impl From<SaConfig> for StrategyConfig {
    fn from(config: SaConfig) -> Self {
        Self::SimulatedAnnealing(config)
    }
}

impl From<PsoConfig> for StrategyConfig {
    fn from(config: PsoConfig) -> Self {
        Self::ParticleSwarm(config)
    }
}

impl From<AcoConfig> for StrategyConfig {
    fn from(config: AcoConfig) -> Self {
        Self::AntColony(config)
    }
}

/// A running strategy.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tsp_approx::{AnytimeOptimizer, City, CityMap, Strategy, StrategyConfig, StrategyKind};
///
/// let cities = vec![
///     City::new(0.0, 0.0),
///     City::new(10.0, 0.0),
///     City::new(10.0, 10.0),
///     City::new(0.0, 10.0),
/// ];
/// let map = Arc::new(CityMap::new(cities).unwrap());
///
/// let kind = StrategyKind::from_label("Nearest Neighbor").unwrap();
/// let mut strategy = Strategy::new(map, StrategyConfig::default_for(kind)).unwrap();
/// let report = strategy.run_to_completion();
/// assert_eq!(report.best_distance, 40.0);
/// ```
#[derive(Debug, Clone)]
pub enum Strategy {
    NearestNeighbor(NearestNeighbor),
    Greedy(Greedy),
    GreedyTwoOpt(GreedyTwoOpt),
    SimulatedAnnealing(SimulatedAnnealing),
    ParticleSwarm(ParticleSwarm),
    AntColony(AntColony),
    Genetic(GeneticApproximation),
    BruteForce(BruteForce),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Strategy::NearestNeighbor($inner) => $body,
            Strategy::Greedy($inner) => $body,
            Strategy::GreedyTwoOpt($inner) => $body,
            Strategy::SimulatedAnnealing($inner) => $body,
            Strategy::ParticleSwarm($inner) => $body,
            Strategy::AntColony($inner) => $body,
            Strategy::Genetic($inner) => $body,
            Strategy::BruteForce($inner) => $body,
        }
    };
}

impl Strategy {
    /// Validates `config` against `map` and builds the strategy.
    pub fn new(map: Arc<CityMap>, config: StrategyConfig) -> Result<Self> {
        Ok(match config {
            StrategyConfig::NearestNeighbor(c) => Self::NearestNeighbor(NearestNeighbor::new(map, c)?),
            StrategyConfig::Greedy(c) => Self::Greedy(Greedy::new(map, c)?),
            StrategyConfig::GreedyTwoOpt(c) => Self::GreedyTwoOpt(GreedyTwoOpt::new(map, c)?),
            StrategyConfig::SimulatedAnnealing(c) => {
                Self::SimulatedAnnealing(SimulatedAnnealing::new(map, c)?)
            }
            StrategyConfig::ParticleSwarm(c) => Self::ParticleSwarm(ParticleSwarm::new(map, c)?),
            StrategyConfig::AntColony(c) => Self::AntColony(AntColony::new(map, c)?),
            StrategyConfig::Genetic(c) => Self::Genetic(GeneticApproximation::new(map, c)?),
            StrategyConfig::BruteForce(c) => Self::BruteForce(BruteForce::new(map, c)?),
        })
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::NearestNeighbor(_) => StrategyKind::NearestNeighbor,
            Self::Greedy(_) => StrategyKind::Greedy,
            Self::GreedyTwoOpt(_) => StrategyKind::GreedyTwoOpt,
            Self::SimulatedAnnealing(_) => StrategyKind::SimulatedAnnealing,
            Self::ParticleSwarm(_) => StrategyKind::ParticleSwarm,
            Self::AntColony(_) => StrategyKind::AntColony,
            Self::Genetic(_) => StrategyKind::Genetic,
            Self::BruteForce(_) => StrategyKind::BruteForce,
        }
    }
}

impl AnytimeOptimizer for Strategy {
    fn name(&self) -> &'static str {
        dispatch!(self, s => s.name())
    }

    fn step(&mut self) -> StepReport {
        dispatch!(self, s => s.step())
    }

    fn state(&self) -> &RunState {
        dispatch!(self, s => s.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::random_cities;
    use crate::random::create_rng;
    use crate::tour::is_permutation;

    #[test]
    fn test_labels_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(StrategyKind::from_label(kind.label()), Some(kind));
            assert_eq!(kind.to_string(), kind.label());
        }
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(StrategyKind::from_label("2-Opt"), Some(StrategyKind::GreedyTwoOpt));
        assert_eq!(StrategyKind::from_label("3-Opt"), None);
        assert_eq!(StrategyKind::from_label("greedy"), None);
    }

    #[test]
    fn test_name_matches_label() {
        let mut rng = create_rng(1);
        let map = Arc::new(CityMap::new(random_cities(6, 50.0, &mut rng)).unwrap());
        for kind in StrategyKind::ALL {
            let strategy = Strategy::new(Arc::clone(&map), StrategyConfig::default_for(kind)).unwrap();
            assert_eq!(strategy.kind(), kind);
            assert_eq!(strategy.name(), kind.label());
        }
    }

    #[test]
    fn test_every_strategy_finishes_with_a_tour() {
        let mut rng = create_rng(2);
        let map = Arc::new(CityMap::new(random_cities(7, 50.0, &mut rng)).unwrap());
        let configs = [
            StrategyConfig::default_for(StrategyKind::NearestNeighbor),
            StrategyConfig::default_for(StrategyKind::Greedy),
            StrategyConfig::default_for(StrategyKind::GreedyTwoOpt),
            SaConfig::default().with_max_iterations(300).into(),
            PsoConfig::default().with_iterations(20).into(),
            AcoConfig::default().with_iterations(10).into(),
            GaConfig::new(20, 4, 0.05, 20).into(),
            StrategyConfig::default_for(StrategyKind::BruteForce),
        ];
        for config in configs {
            let mut strategy = Strategy::new(Arc::clone(&map), config.with_seed(5)).unwrap();
            let report = strategy.run_to_completion();
            assert!(report.best_distance.is_finite(), "{}", strategy.name());
            assert!(is_permutation(strategy.best_tour(), 7));
            assert_eq!(strategy.step(), report);
        }
    }

    #[test]
    fn test_with_seed_leaves_deterministic_configs() {
        let config = StrategyConfig::default_for(StrategyKind::Greedy);
        assert_eq!(config.clone().with_seed(3), config);
        match StrategyConfig::default_for(StrategyKind::AntColony).with_seed(3) {
            StrategyConfig::AntColony(c) => assert_eq!(c.seed, Some(3)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_construction_errors_propagate() {
        let mut rng = create_rng(3);
        let map = Arc::new(CityMap::new(random_cities(12, 50.0, &mut rng)).unwrap());
        let brute = StrategyConfig::default_for(StrategyKind::BruteForce);
        assert!(Strategy::new(Arc::clone(&map), brute).is_err());
        let nn = StrategyConfig::NearestNeighbor(NearestNeighborConfig::default().with_start(12));
        assert!(Strategy::new(map, nn).is_err());
    }
}
