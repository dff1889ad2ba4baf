//! Greedy edge construction.

use super::config::GreedyConfig;
use crate::error::Result;
use crate::optimizer::{AnytimeOptimizer, RunState, StepReport};
use crate::strategy::StrategyKind;
use crate::tour::CityMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Builds a tour from the globally shortest edges.
///
/// Edges are considered in ascending length (ties broken by city indices).
/// An edge is committed unless it would give a city a third neighbor or
/// close a cycle early. One step commits exactly one edge; after `n - 1`
/// edges the Hamiltonian path is closed into a tour.
#[derive(Debug, Clone)]
pub struct Greedy {
    map: Arc<CityMap>,
    edges: Vec<(usize, usize)>,
    cursor: usize,
    links: Vec<[Option<usize>; 2]>,
    components: DisjointSet,
    committed: Vec<(usize, usize)>,
    state: RunState,
}

impl Greedy {
    pub fn new(map: Arc<CityMap>, _config: GreedyConfig) -> Result<Self> {
        let n = map.len();
        let mut edges: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();
        edges.sort_by(|a, b| {
            map.distance(a.0, a.1)
                .total_cmp(&map.distance(b.0, b.1))
                .then(a.cmp(b))
        });

        debug!(cities = n, edges = edges.len(), "greedy initialized");

        Ok(Self {
            links: vec![[None; 2]; n],
            components: DisjointSet::new(n),
            committed: Vec::with_capacity(n - 1),
            map,
            edges,
            cursor: 0,
            state: RunState::new(),
        })
    }

    /// Edges committed so far, in commit order.
    pub fn committed_edges(&self) -> &[(usize, usize)] {
        &self.committed
    }

    fn degree(&self, city: usize) -> usize {
        self.links[city].iter().filter(|l| l.is_some()).count()
    }

    fn link(&mut self, a: usize, b: usize) {
        for (from, to) in [(a, b), (b, a)] {
            if let Some(slot) = self.links[from].iter_mut().find(|l| l.is_none()) {
                *slot = Some(to);
            }
        }
        self.components.union(a, b);
        self.committed.push((a, b));
    }

    /// Walks the committed path from its lowest-index endpoint.
    fn path_to_tour(&self) -> Vec<usize> {
        let n = self.map.len();
        let start = (0..n).find(|&c| self.degree(c) < 2).unwrap_or(0);
        let mut tour = Vec::with_capacity(n);
        let mut prev = None;
        let mut current = Some(start);
        while let Some(city) = current {
            tour.push(city);
            let next = self.links[city]
                .iter()
                .flatten()
                .copied()
                .find(|&c| Some(c) != prev);
            prev = Some(city);
            current = next.filter(|_| tour.len() < n);
        }
        tour
    }
}

impl AnytimeOptimizer for Greedy {
    fn name(&self) -> &'static str {
        StrategyKind::Greedy.label()
    }

    fn step(&mut self) -> StepReport {
        if self.state.is_finished() {
            return self.state.report();
        }
        self.state.begin_step();

        while let Some(&(a, b)) = self.edges.get(self.cursor) {
            self.cursor += 1;
            if self.degree(a) < 2
                && self.degree(b) < 2
                && self.components.find(a) != self.components.find(b)
            {
                self.link(a, b);
                trace!(a, b, committed = self.committed.len(), "edge committed");
                break;
            }
        }

        if self.committed.len() + 1 >= self.map.len() || self.cursor >= self.edges.len() {
            let tour = self.path_to_tour();
            let distance = self.map.tour_length(&tour);
            self.state.offer(&tour, distance);
            self.state.finish();
            debug!(distance, steps = self.state.steps(), "greedy finished");
        }

        self.state.report()
    }

    fn state(&self) -> &RunState {
        &self.state
    }
}

/// Union-find over city indices, used to reject premature cycles.
#[derive(Debug, Clone)]
struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
    }
}
