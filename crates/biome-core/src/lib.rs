//! Simulation engine core for Biome.
//!
//! This crate drives the multi-species Game of Life: it validates the
//! initial world, runs the bounded decide-then-apply loop, records every
//! iteration's snapshot and exposes the results for persistence and
//! rendering.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `biome-config.yaml`.
//! - [`decision`] -- Decision phase over the frozen grid.
//! - [`history`] -- Append-only snapshot history.
//! - [`simulation`] -- [`Simulation`] lifecycle, run loop and exports.
//! - [`tick`] -- One decide-then-apply iteration.

pub mod config;
pub mod decision;
pub mod history;
pub mod simulation;
pub mod tick;

pub use config::{ConfigError, SimulationConfig};
pub use history::History;
pub use simulation::{IterationCallback, NoOpCallback, Simulation, SimulationError, SimulationPhase};
pub use tick::IterationSummary;
