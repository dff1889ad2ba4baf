//! The stepwise execution contract shared by every strategy.
//!
//! A strategy is constructed from a [`CityMap`](crate::tour::CityMap) and a
//! validated configuration, then advanced one bounded unit of work at a
//! time with [`AnytimeOptimizer::step`]. Each call reports the best tour
//! length found so far and whether the search is exhausted.
//!
//! ```text
//! Initialized ──step()──▶ Running ──step()──▶ Done ──step()──▶ Done (no-op)
//! ```

/// Lifecycle of a strategy run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, `step()` not yet called.
    Initialized,
    /// At least one step taken, termination condition not yet met.
    Running,
    /// Termination condition met. Terminal.
    Done,
}

/// Outcome of a single [`AnytimeOptimizer::step`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Length of the best complete tour found by any step so far.
    ///
    /// `f64::INFINITY` while a constructive strategy has not yet placed
    /// every city. Never increases between calls.
    pub best_distance: f64,

    /// `true` from the call that exhausts the strategy onwards.
    pub finished: bool,
}

impl From<StepReport> for (f64, bool) {
    fn from(report: StepReport) -> Self {
        (report.best_distance, report.finished)
    }
}

/// Per-strategy progress record.
///
/// Owned exclusively by one strategy instance and mutated only by its
/// `step()`.
#[derive(Debug, Clone)]
pub struct RunState {
    phase: Phase,
    best_tour: Vec<usize>,
    best_distance: f64,
    steps: usize,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Initialized,
            best_tour: Vec::new(),
            best_distance: f64::INFINITY,
            steps: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Best complete tour so far; empty until one exists.
    pub fn best_tour(&self) -> &[usize] {
        &self.best_tour
    }

    pub fn best_distance(&self) -> f64 {
        self.best_distance
    }

    /// Number of steps that did work (terminal no-op calls excluded).
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Records `tour` as the new best if it is strictly shorter.
    ///
    /// Returns `true` when the best was replaced.
    pub fn offer(&mut self, tour: &[usize], distance: f64) -> bool {
        if distance < self.best_distance {
            self.best_tour.clear();
            self.best_tour.extend_from_slice(tour);
            self.best_distance = distance;
            true
        } else {
            false
        }
    }

    /// Marks the start of a working step.
    pub(crate) fn begin_step(&mut self) {
        self.phase = Phase::Running;
        self.steps += 1;
    }

    /// Transitions to [`Phase::Done`].
    pub(crate) fn finish(&mut self) {
        self.phase = Phase::Done;
    }

    pub fn report(&self) -> StepReport {
        StepReport {
            best_distance: self.best_distance,
            finished: self.is_finished(),
        }
    }
}

/// An interruptible TSP search that improves monotonically.
///
/// Implementors must guarantee:
///
/// - `step()` performs a bounded amount of work and never blocks.
/// - `best_distance` in successive reports is non-increasing.
/// - Once a report has `finished == true`, every later call returns the
///   same report without side effects.
/// - Every complete tour held is a permutation of all cities.
pub trait AnytimeOptimizer {
    /// Display name of the strategy.
    fn name(&self) -> &'static str;

    /// Advances the search by one unit of work.
    fn step(&mut self) -> StepReport;

    /// Progress record.
    fn state(&self) -> &RunState;

    fn best_distance(&self) -> f64 {
        self.state().best_distance()
    }

    fn best_tour(&self) -> &[usize] {
        self.state().best_tour()
    }

    fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    /// Steps until finished and returns the final report.
    fn run_to_completion(&mut self) -> StepReport {
        loop {
            let report = self.step();
            if report.finished {
                return report;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_only_strict_improvement() {
        let mut state = RunState::new();
        assert_eq!(state.best_distance(), f64::INFINITY);
        assert!(state.best_tour().is_empty());

        assert!(state.offer(&[0, 1, 2], 10.0));
        assert!(!state.offer(&[0, 2, 1], 10.0));
        assert_eq!(state.best_tour(), &[0, 1, 2]);
        assert!(!state.offer(&[1, 0, 2], 11.0));
        assert!(state.offer(&[2, 1, 0], 9.5));
        assert_eq!(state.best_tour(), &[2, 1, 0]);
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = RunState::new();
        assert_eq!(state.phase(), Phase::Initialized);
        state.begin_step();
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.steps(), 1);
        state.finish();
        assert_eq!(state.phase(), Phase::Done);
        assert!(state.report().finished);
    }

    #[test]
    fn test_report_into_tuple() {
        let report = StepReport {
            best_distance: 4.0,
            finished: true,
        };
        let (d, done): (f64, bool) = report.into();
        assert_eq!(d, 4.0);
        assert!(done);
    }
}
