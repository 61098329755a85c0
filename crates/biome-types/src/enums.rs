//! Enumeration types for the Biome simulation.

use serde::{Deserialize, Serialize};

use crate::structs::Species;

/// The decision a single cell reaches during one iteration.
///
/// Survival is the absence of an outcome, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// A live cell has too few neighbors of its own species and dies.
    Isolated,
    /// A live cell has too many neighbors of its own species and dies.
    Overcrowded,
    /// An empty cell is born into the given parent species.
    Birth {
        /// Species the new cell inherits.
        parent: Species,
    },
}

/// Order in which the decision phase visits grid positions.
///
/// Both strategies visit candidates in x-major order and produce identical
/// operation batches; `Frontier` skips empty positions with no live
/// neighbor, which can never produce an outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStrategy {
    /// Visit every position of the `N x N` grid.
    #[default]
    Exhaustive,
    /// Visit live cells and the in-bounds neighbors of live cells only.
    Frontier,
}
