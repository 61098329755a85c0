//! Iteration callback that reports run progress through tracing.
//!
//! Every iteration is logged at `info` with its counts. With grid dumps
//! enabled the full grid is also logged as text at `debug`, one row per
//! line.

use biome_core::{IterationCallback, IterationSummary};
use biome_world::Grid;
use tracing::{debug, info};

/// Callback that logs each iteration.
pub struct ProgressLogger {
    dump_grid: bool,
    iterations: u32,
    peak_population: usize,
}

impl ProgressLogger {
    /// Create a logger for a run of `iterations` iterations.
    pub const fn new(iterations: u32, dump_grid: bool) -> Self {
        Self {
            dump_grid,
            iterations,
            peak_population: 0,
        }
    }

    /// Largest population seen after any iteration.
    pub const fn peak_population(&self) -> usize {
        self.peak_population
    }
}

impl IterationCallback for ProgressLogger {
    fn on_iteration(&mut self, summary: &IterationSummary, grid: &Grid) {
        self.peak_population = self.peak_population.max(summary.population);
        info!(
            iteration = summary.iteration,
            of = self.iterations,
            births = summary.births,
            deaths = summary.deaths(),
            isolations = summary.isolations,
            overcrowdings = summary.overcrowdings,
            population = summary.population,
            "Iteration complete"
        );
        if self.dump_grid {
            debug!(iteration = summary.iteration, "Grid\n{}", grid.render_text());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tracks_peak_population() {
        let grid = Grid::new(2).unwrap();
        let mut logger = ProgressLogger::new(3, true);
        for (iteration, population) in [(1, 4), (2, 9), (3, 1)] {
            let summary = IterationSummary {
                iteration,
                population,
                ..IterationSummary::default()
            };
            logger.on_iteration(&summary, &grid);
        }
        assert_eq!(logger.peak_population(), 9);
    }
}
