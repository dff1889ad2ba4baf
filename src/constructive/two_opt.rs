//! Greedy construction followed by 2-opt local search.

use super::config::{GreedyConfig, TwoOptConfig};
use super::greedy::Greedy;
use crate::error::Result;
use crate::optimizer::{AnytimeOptimizer, RunState, StepReport};
use crate::strategy::StrategyKind;
use crate::tour::CityMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Runs [`Greedy`] to completion, then improves the tour with 2-opt.
///
/// During the improvement phase each step examines one pair of
/// non-adjacent edges `(t[i], t[i+1])`, `(t[j], t[j+1])` and reverses
/// `t[i+1..=j]` only if that strictly shortens the tour. The search ends
/// when a full pass over all pairs finds no improving swap.
#[derive(Debug, Clone)]
pub struct GreedyTwoOpt {
    map: Arc<CityMap>,
    config: TwoOptConfig,
    greedy: Greedy,
    tour: Vec<usize>,
    i: usize,
    j: usize,
    improved_in_pass: bool,
    passes: usize,
    state: RunState,
}

impl GreedyTwoOpt {
    pub fn new(map: Arc<CityMap>, config: TwoOptConfig) -> Result<Self> {
        config.validate()?;
        let greedy = Greedy::new(Arc::clone(&map), GreedyConfig)?;
        Ok(Self {
            map,
            config,
            greedy,
            tour: Vec::new(),
            i: 0,
            j: 2,
            improved_in_pass: false,
            passes: 0,
            state: RunState::new(),
        })
    }

    /// The tour being improved. Empty during the greedy phase.
    pub fn current_tour(&self) -> &[usize] {
        &self.tour
    }

    /// Completed 2-opt passes.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Length change if `tour[i+1..=j]` were reversed.
    fn swap_delta(&self, i: usize, j: usize) -> f64 {
        let n = self.tour.len();
        let (a, b) = (self.tour[i], self.tour[i + 1]);
        let (c, d) = (self.tour[j], self.tour[(j + 1) % n]);
        self.map.distance(a, c) + self.map.distance(b, d)
            - self.map.distance(a, b)
            - self.map.distance(c, d)
    }

    /// Moves to the next candidate pair. Returns `true` when a pass ends.
    fn advance(&mut self) -> bool {
        let n = self.tour.len();
        // Edge (t[n-1], t[0]) is adjacent to edge (t[0], t[1]).
        let limit = if self.i == 0 { n - 1 } else { n };
        self.j += 1;
        if self.j >= limit {
            self.i += 1;
            self.j = self.i + 2;
        }
        if self.j >= n {
            self.i = 0;
            self.j = 2;
            return true;
        }
        false
    }

    fn end_pass(&mut self) {
        self.passes += 1;
        if self.improved_in_pass {
            self.improved_in_pass = false;
        } else {
            self.state.finish();
            debug!(
                distance = self.state.best_distance(),
                passes = self.passes,
                steps = self.state.steps(),
                "2-opt reached local optimum"
            );
        }
    }
}

impl AnytimeOptimizer for GreedyTwoOpt {
    fn name(&self) -> &'static str {
        StrategyKind::GreedyTwoOpt.label()
    }

    fn step(&mut self) -> StepReport {
        if self.state.is_finished() {
            return self.state.report();
        }
        self.state.begin_step();

        if !self.greedy.is_finished() {
            let report = self.greedy.step();
            if report.finished {
                self.tour = self.greedy.best_tour().to_vec();
                self.state.offer(&self.tour, report.best_distance);
                if self.tour.len() < 4 {
                    // No pair of non-adjacent edges exists.
                    self.state.finish();
                }
            }
            return self.state.report();
        }

        let (i, j) = (self.i, self.j);
        let delta = self.swap_delta(i, j);
        if delta < -self.config.epsilon {
            self.tour[i + 1..=j].reverse();
            self.improved_in_pass = true;
            let distance = self.map.tour_length(&self.tour);
            self.state.offer(&self.tour, distance);
            trace!(i, j, delta, distance, "2-opt swap applied");
        }

        if self.advance() {
            self.end_pass();
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
    use crate::geometry::{random_cities, City};
    use crate::random::create_rng;
    use crate::tour::is_permutation;

    fn map(points: &[(f64, f64)]) -> Arc<CityMap> {
        Arc::new(CityMap::new(points.iter().map(|&p| City::from(p)).collect()).unwrap())
    }

    #[test]
    fn test_candidate_enumeration_covers_all_pairs() {
        let mut opt = GreedyTwoOpt::new(
            map(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0), (5.0, 0.0)]),
            TwoOptConfig::default(),
        )
        .unwrap();
        opt.tour = (0..6).collect();

        let mut pairs = vec![(opt.i, opt.j)];
        while !opt.advance() {
            pairs.push((opt.i, opt.j));
        }
        // n(n-3)/2 non-adjacent edge pairs.
        assert_eq!(pairs.len(), 9);
        assert!(!pairs.contains(&(0, 5)));
        assert!(pairs.iter().all(|&(i, j)| j >= i + 2 && j < 6));
    }

    #[test]
    fn test_monotone_and_finishes() {
        let mut rng = create_rng(11);
        let m = Arc::new(CityMap::new(random_cities(30, 100.0, &mut rng)).unwrap());
        let mut opt = GreedyTwoOpt::new(m, TwoOptConfig::default()).unwrap();

        let mut last = f64::INFINITY;
        let mut greedy_distance = None;
        loop {
            let report = opt.step();
            assert!(report.best_distance <= last);
            last = report.best_distance;
            if greedy_distance.is_none() && report.best_distance.is_finite() {
                greedy_distance = Some(report.best_distance);
            }
            if report.finished {
                break;
            }
        }
        assert!(opt.passes() >= 1);
        assert!(last <= greedy_distance.unwrap());
        assert!(is_permutation(opt.best_tour(), 30));
    }

    #[test]
    fn test_held_tour_after_greedy_phase() {
        let mut rng = create_rng(21);
        let m = Arc::new(CityMap::new(random_cities(15, 100.0, &mut rng)).unwrap());
        let mut opt = GreedyTwoOpt::new(m, TwoOptConfig::default()).unwrap();
        assert_eq!(opt.name(), "2-Opt");

        while opt.current_tour().is_empty() {
            assert!(!opt.step().finished);
        }
        assert_eq!(opt.current_tour(), opt.greedy.best_tour());
        while !opt.step().finished {
            assert!(is_permutation(opt.current_tour(), 15));
            assert!(is_permutation(opt.best_tour(), 15));
        }
        assert_eq!(opt.current_tour(), opt.best_tour());
    }

    #[test]
    fn test_removes_crossing() {
        // Greedy on these points is optimal already, so seed a crossing tour
        // directly and let the search repair it.
        let mut opt = GreedyTwoOpt::new(
            map(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]),
            TwoOptConfig::default(),
        )
        .unwrap();
        opt.greedy.run_to_completion();
        opt.tour = vec![0, 2, 1, 3];

        let report = opt.run_to_completion();
        assert!((report.best_distance - 40.0).abs() < 1e-9);
        assert!(is_permutation(opt.best_tour(), 4));
    }

    #[test]
    fn test_three_cities_finish_after_greedy() {
        let mut opt = GreedyTwoOpt::new(
            map(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]),
            TwoOptConfig::default(),
        )
        .unwrap();
        let report = opt.run_to_completion();
        assert!((report.best_distance - 12.0).abs() < 1e-9);
        assert_eq!(opt.state().steps(), 2);
        assert_eq!(opt.step(), report);
    }
}
