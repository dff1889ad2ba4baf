//! Compares every strategy on one random map, then tunes the genetic
//! strategy with a small grid search.
//!
//! ```text
//! cargo run --release --features parallel --example compare
//! TSP_CITIES=60 RUST_LOG=debug cargo run --release --features parallel --example compare
//! ```

use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tsp_approx::cv::{GridSearch, ParamGrid};
use tsp_approx::random::create_rng;
use tsp_approx::{
    fitness_of, random_cities, AnytimeOptimizer, CityMap, Strategy, StrategyConfig, StrategyKind,
};

const MAP_SIZE: f64 = 200.0;

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn enable_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    enable_tracing();

    let n = env_usize("TSP_CITIES", 40);
    let seed = env_usize("TSP_SEED", 7) as u64;
    let mut rng = create_rng(seed);
    let map = Arc::new(CityMap::new(random_cities(n, MAP_SIZE, &mut rng))?);
    info!(cities = n, seed, "map generated");

    for kind in StrategyKind::ALL {
        let config = StrategyConfig::default_for(kind).with_seed(seed);
        let mut strategy = match Strategy::new(Arc::clone(&map), config) {
            Ok(strategy) => strategy,
            Err(err) => {
                warn!(strategy = %kind, %err, "skipped");
                continue;
            }
        };

        let start = Instant::now();
        let mut score = 0.0;
        let report = loop {
            let report = strategy.step();
            score += fitness_of(report.best_distance);
            if report.finished {
                break report;
            }
        };
        info!(
            strategy = %kind,
            distance = report.best_distance,
            steps = strategy.state().steps(),
            cumulative_score = score,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "strategy finished"
        );
    }

    let grid = ParamGrid::new(
        vec![50, 100],
        vec![5, 10, 20],
        vec![0.001, 0.01],
        vec![100],
    );
    let results = GridSearch::new(grid)
        .with_repeats(3)
        .with_seed(seed)
        .with_parallel(true)
        .fit(&map)?;

    for (rank, result) in results.iter().take(5).enumerate() {
        info!(
            rank = rank + 1,
            population_size = result.params.population_size,
            elite_size = result.params.elite_size,
            mutation_rate = result.params.mutation_rate,
            generations = result.params.generations,
            score = result.cumulative_score,
            avg_distance = result.avg_final_distance,
            "top configuration"
        );
    }
    Ok(())
}
