//! Nearest-neighbor construction.

use super::config::NearestNeighborConfig;
use crate::error::Result;
use crate::optimizer::{AnytimeOptimizer, RunState, StepReport};
use crate::strategy::StrategyKind;
use crate::tour::CityMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Builds a tour by repeatedly walking to the closest unvisited city.
///
/// One step appends exactly one city. Among equally distant candidates the
/// lowest city index wins, so the result is deterministic.
#[derive(Debug, Clone)]
pub struct NearestNeighbor {
    map: Arc<CityMap>,
    tour: Vec<usize>,
    visited: Vec<bool>,
    state: RunState,
}

impl NearestNeighbor {
    pub fn new(map: Arc<CityMap>, config: NearestNeighborConfig) -> Result<Self> {
        let n = map.len();
        config.validate_for(n)?;

        let mut visited = vec![false; n];
        visited[config.start] = true;
        let mut tour = Vec::with_capacity(n);
        tour.push(config.start);

        debug!(cities = n, start = config.start, "nearest neighbor initialized");

        Ok(Self {
            map,
            tour,
            visited,
            state: RunState::new(),
        })
    }

    /// Cities placed so far, in visiting order.
    pub fn partial_tour(&self) -> &[usize] {
        &self.tour
    }

    fn nearest_unvisited(&self, from: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (city, _) in self.visited.iter().enumerate().filter(|&(_, &v)| !v) {
            let d = self.map.distance(from, city);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((city, d));
            }
        }
        best.map(|(city, _)| city)
    }
}

impl AnytimeOptimizer for NearestNeighbor {
    fn name(&self) -> &'static str {
        StrategyKind::NearestNeighbor.label()
    }

    fn step(&mut self) -> StepReport {
        if self.state.is_finished() {
            return self.state.report();
        }
        self.state.begin_step();

        let current = self.tour[self.tour.len() - 1];
        if let Some(next) = self.nearest_unvisited(current) {
            self.visited[next] = true;
            self.tour.push(next);
            trace!(from = current, to = next, placed = self.tour.len(), "city appended");
        }

        if self.tour.len() == self.map.len() {
            let distance = self.map.tour_length(&self.tour);
            self.state.offer(&self.tour, distance);
            self.state.finish();
            debug!(distance, steps = self.state.steps(), "nearest neighbor finished");
        }

        self.state.report()
    }

    fn state(&self) -> &RunState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::City;

    fn square() -> Arc<CityMap> {
        Arc::new(
            CityMap::new(vec![
                City::new(0.0, 0.0),
                City::new(0.0, 10.0),
                City::new(10.0, 10.0),
                City::new(10.0, 0.0),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_square_scenario() {
        let mut nn = NearestNeighbor::new(square(), NearestNeighborConfig::default()).unwrap();

        // (0,0) is equidistant to (0,10) and (10,0); the lower index wins.
        let first = nn.step();
        assert!(!first.finished);
        assert_eq!(first.best_distance, f64::INFINITY);
        assert_eq!(nn.partial_tour(), &[0, 1]);

        let report = nn.run_to_completion();
        assert!(report.finished);
        assert_eq!(nn.best_tour(), &[0, 1, 2, 3]);
        assert!((report.best_distance - 40.0).abs() < 1e-9);
        assert_eq!(nn.state().steps(), 3);
    }

    #[test]
    fn test_one_city_per_step() {
        let mut nn = NearestNeighbor::new(square(), NearestNeighborConfig::default()).unwrap();
        for placed in 2..=4 {
            nn.step();
            assert_eq!(nn.partial_tour().len(), placed);
        }
        assert!(nn.is_finished());
    }

    #[test]
    fn test_custom_start() {
        let config = NearestNeighborConfig::default().with_start(2);
        let mut nn = NearestNeighbor::new(square(), config).unwrap();
        nn.run_to_completion();
        assert_eq!(nn.best_tour()[0], 2);
        assert!((nn.best_distance() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_terminal_idempotence() {
        let mut nn = NearestNeighbor::new(square(), NearestNeighborConfig::default()).unwrap();
        let done = nn.run_to_completion();
        let steps = nn.state().steps();
        for _ in 0..3 {
            assert_eq!(nn.step(), done);
        }
        assert_eq!(nn.state().steps(), steps);
    }

    #[test]
    fn test_start_out_of_range() {
        let config = NearestNeighborConfig::default().with_start(4);
        assert!(NearestNeighbor::new(square(), config).is_err());
    }
}
