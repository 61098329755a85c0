//! One iteration of the simulation: decide, then apply.
//!
//! 1. **Decide** -- every candidate cell reads the grid as it stood at the
//!    start of the iteration and yields at most one operation
//!    ([`decision::collect_operations`]).
//! 2. **Apply** -- the batch is validated and written to the grid in one
//!    step ([`Grid::apply`]).
//!
//! Recording the snapshot is left to the caller so that a failed apply
//! never leaves a half-recorded iteration behind.
//!
//! [`decision::collect_operations`]: crate::decision::collect_operations

use biome_types::ScanStrategy;
use biome_world::{Grid, WorldError};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::decision;

/// Summary of a single iteration's execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IterationSummary {
    /// 1-based iteration number; matches the history index it produces.
    pub iteration: u32,
    /// Number of operations collected in the decision phase.
    pub operations: usize,
    /// Organisms born this iteration.
    pub births: u32,
    /// Organisms that died of isolation.
    pub isolations: u32,
    /// Organisms that died of overcrowding.
    pub overcrowdings: u32,
    /// Living organisms after the apply phase.
    pub population: usize,
}

impl IterationSummary {
    /// Total deaths this iteration.
    pub const fn deaths(&self) -> u32 {
        self.isolations.saturating_add(self.overcrowdings)
    }
}

/// Execute one iteration against `grid`.
///
/// # Errors
///
/// Returns [`WorldError`] if the collected batch fails validation. The grid
/// is left untouched in that case.
pub fn run_iteration<R: Rng + ?Sized>(
    grid: &mut Grid,
    iteration: u32,
    strategy: ScanStrategy,
    rng: &mut R,
) -> Result<IterationSummary, WorldError> {
    // --- Phase 1: Decide ---
    let operations = decision::collect_operations(grid, strategy, rng);
    debug!(iteration, operations = operations.len(), "Decision phase complete");

    // --- Phase 2: Apply ---
    let applied = grid.apply(&operations)?;

    let summary = IterationSummary {
        iteration,
        operations: operations.len(),
        births: applied.births,
        isolations: applied.isolations,
        overcrowdings: applied.overcrowdings,
        population: grid.population(),
    };
    debug!(
        iteration,
        births = summary.births,
        isolations = summary.isolations,
        overcrowdings = summary.overcrowdings,
        population = summary.population,
        "Iteration applied"
    );
    Ok(summary)
}
