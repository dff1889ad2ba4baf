//! Stepwise Ant System engine.

use super::config::AcoConfig;
use crate::error::Result;
use crate::optimizer::{AnytimeOptimizer, RunState, StepReport};
use crate::random::{rng_from, TourRng};
use crate::strategy::StrategyKind;
use crate::tour::CityMap;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, trace};

/// Distances below this are treated as this when computing visibility.
const MIN_DISTANCE: f64 = 1e-10;

/// Ant System over a directed pheromone matrix.
///
/// Each step lets every ant build a complete tour from a random start
/// city, choosing the next city with probability proportional to
/// `tau^alpha * (1/d)^beta`. Afterwards every ant deposits
/// `deposit / length` on the directed edges it traversed, and all trails
/// are multiplied by `1 - evaporation`.
///
/// Reference: Dorigo, Maniezzo & Colorni (1996), "Ant System:
/// Optimization by a Colony of Cooperating Agents"
#[derive(Debug, Clone)]
pub struct AntColony {
    map: Arc<CityMap>,
    config: AcoConfig,
    rng: TourRng,
    /// Row-major `n×n`; entry `i*n + j` is the trail on edge `i → j`.
    pheromone: Vec<f64>,
    /// `(1/d)^beta`, precomputed.
    visibility: Vec<f64>,
    iteration: usize,
    state: RunState,
}

impl AntColony {
    pub fn new(map: Arc<CityMap>, config: AcoConfig) -> Result<Self> {
        config.validate()?;

        let n = map.len();
        let mut visibility = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let d = map.distance(i, j).max(MIN_DISTANCE);
                    visibility[i * n + j] = d.recip().powf(config.beta);
                }
            }
        }

        debug!(
            cities = n,
            ants = config.ants,
            iterations = config.iterations,
            alpha = config.alpha,
            beta = config.beta,
            evaporation = config.evaporation,
            "ant colony initialized"
        );

        Ok(Self {
            rng: rng_from(config.seed),
            pheromone: vec![config.initial_pheromone; n * n],
            visibility,
            map,
            config,
            iteration: 0,
            state: RunState::new(),
        })
    }

    /// Trail on the directed edge `from → to`.
    pub fn pheromone(&self, from: usize, to: usize) -> f64 {
        self.pheromone[from * self.map.len() + to]
    }

    /// Iterations completed.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    fn construct_tour(&mut self) -> Vec<usize> {
        let n = self.map.len();
        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n);

        let mut current = self.rng.random_range(0..n);
        visited[current] = true;
        tour.push(current);

        let mut weights = vec![0.0; n];
        while tour.len() < n {
            let row = current * n;
            let mut total = 0.0;
            for j in 0..n {
                weights[j] = if visited[j] {
                    0.0
                } else {
                    self.pheromone[row + j].powf(self.config.alpha) * self.visibility[row + j]
                };
                total += weights[j];
            }

            let chosen = if total > 0.0 && total.is_finite() {
                roulette(&weights, total, &mut self.rng)
            } else {
                None
            };
            let next = match chosen {
                Some(j) => j,
                None => {
                    // All weights vanished; pick uniformly among the unvisited.
                    let k = self.rng.random_range(0..n - tour.len());
                    (0..n).filter(|&j| !visited[j]).nth(k).unwrap_or(current)
                }
            };

            visited[next] = true;
            tour.push(next);
            current = next;
        }
        tour
    }

    fn deposit(&mut self, tour: &[usize], length: f64) {
        let n = self.map.len();
        let amount = if length > 0.0 {
            self.config.deposit / length
        } else {
            self.config.deposit
        };
        for k in 0..n {
            let (from, to) = (tour[k], tour[(k + 1) % n]);
            self.pheromone[from * n + to] += amount;
        }
    }

    fn evaporate(&mut self) {
        let keep = 1.0 - self.config.evaporation;
        for tau in &mut self.pheromone {
            *tau *= keep;
        }
    }
}

impl AnytimeOptimizer for AntColony {
    fn name(&self) -> &'static str {
        StrategyKind::AntColony.label()
    }

    fn step(&mut self) -> StepReport {
        if self.state.is_finished() {
            return self.state.report();
        }
        self.state.begin_step();

        let mut tours = Vec::with_capacity(self.config.ants);
        for _ in 0..self.config.ants {
            let tour = self.construct_tour();
            let length = self.map.tour_length(&tour);
            self.state.offer(&tour, length);
            tours.push((tour, length));
        }
        for (tour, length) in &tours {
            self.deposit(tour, *length);
        }
        self.evaporate();

        self.iteration += 1;
        trace!(
            iteration = self.iteration,
            best = self.state.best_distance(),
            "colony iteration complete"
        );

        if self.iteration >= self.config.iterations {
            self.state.finish();
            debug!(
                distance = self.state.best_distance(),
                iterations = self.iteration,
                "ant colony finished"
            );
        }

        self.state.report()
    }

    fn state(&self) -> &RunState {
        &self.state
    }
}

/// Index drawn with probability `weights[i] / total`, or `None` when
/// rounding leaves nothing selected.
fn roulette<R: Rng>(weights: &[f64], total: f64, rng: &mut R) -> Option<usize> {
    let mut pick = rng.random::<f64>() * total;
    let mut last_positive = None;
    for (j, &w) in weights.iter().enumerate() {
        if w > 0.0 {
            if pick < w {
                return Some(j);
            }
            pick -= w;
            last_positive = Some(j);
        }
    }
    last_positive
}
