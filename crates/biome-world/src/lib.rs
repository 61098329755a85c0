//! Grid, cells and life rules for the Biome simulation.
//!
//! This crate models the automaton itself: a sparse bounded grid of live
//! cells, the per-cell neighborhood census, the birth/survival/death rule
//! and the species palette that says which species exist.
//!
//! # Modules
//!
//! - [`cell`] -- [`Cell`] (one position plus optional occupant) and its
//!   neighborhood [`Census`].
//! - [`error`] -- Error types for grid and palette operations.
//! - [`grid`] -- [`Grid`]: sparse occupancy map with batch apply and
//!   snapshots.
//! - [`rules`] -- Fixed thresholds and the rule evaluator.
//! - [`species`] -- [`SpeciesPalette`] registry validated at load time.
//!
//! [`Census`]: cell::Census

pub mod cell;
pub mod error;
pub mod grid;
pub mod rules;
pub mod species;

// Re-export primary types at crate root.
pub use cell::{Cell, Census};
pub use error::WorldError;
pub use grid::{ApplySummary, Grid};
pub use rules::{BIRTH_THRESHOLD, ISOLATION_THRESHOLD, OVERCROWDING_THRESHOLD};
pub use species::{DEFAULT_COLORS, SpeciesPalette};
