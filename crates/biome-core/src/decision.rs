//! Decision phase: read the frozen grid and collect every cell's operation.
//!
//! Nothing here mutates the grid. The collected operations are applied as a
//! single batch afterwards, so no decision observes another decision's
//! effect within the same iteration.
//!
//! Two scan strategies produce the same operations:
//!
//! - [`ScanStrategy::Exhaustive`] visits every position of the N x N grid.
//! - [`ScanStrategy::Frontier`] visits only live cells and their
//!   neighbors. Positions outside that set have no live neighbor and are
//!   empty, so no rule can fire there.
//!
//! Both strategies visit candidates in x-major order, which keeps the RNG
//! draw sequence (and therefore tied-birth picks) identical between them.

use biome_types::{Operation, Position, ScanStrategy};
use biome_world::Grid;
use rand::Rng;
use tracing::trace;

/// Collect the operations for one iteration from the current grid.
///
/// Cells whose rule yields no outcome contribute nothing. The returned
/// operations are ordered by position (x-major).
pub fn collect_operations<R: Rng + ?Sized>(
    grid: &Grid,
    strategy: ScanStrategy,
    rng: &mut R,
) -> Vec<Operation> {
    match strategy {
        ScanStrategy::Exhaustive => decide_all(grid, grid.positions(), rng),
        ScanStrategy::Frontier => decide_all(grid, grid.frontier().into_iter(), rng),
    }
}

fn decide_all<R, I>(grid: &Grid, positions: I, rng: &mut R) -> Vec<Operation>
where
    R: Rng + ?Sized,
    I: Iterator<Item = Position>,
{
    positions
        .filter_map(|position| {
            let cell = grid.cell(position);
            let outcome = cell.decide(grid, rng)?;
            trace!(%position, alive = cell.is_alive(), ?outcome, "Cell decided");
            Some(Operation { position, outcome })
        })
        .collect()
}
