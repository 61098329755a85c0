//! Shared type definitions for the Biome simulation.
//!
//! This crate is the single source of truth for the types that cross crate
//! boundaries: grid coordinates, species ids, per-iteration operations, the
//! render feed and the persisted world document. The render feed types flow
//! to `TypeScript` via `ts-rs` for the animation page.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for run identifiers
//! - [`enums`] -- Cell outcomes and scan strategies
//! - [`structs`] -- Species, positions, operations, snapshots and documents

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Outcome, ScanStrategy};
pub use ids::RunId;
pub use structs::{
    Operation, OrganismRecord, OrganismView, Position, RenderFeed, Snapshot, Species,
    WorldDocument, WorldSettings, ZeroSpeciesId,
};
