//! Error types for the `biome-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use biome_types::Position;

/// Errors that can occur during grid and palette operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A grid must have at least one cell per side.
    #[error("grid side length must be at least 1")]
    EmptyGrid,

    /// A position lies outside the `N x N` grid.
    #[error("position {position} is outside the {cells}x{cells} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid side length.
        cells: u32,
    },

    /// A species id has no entry in the palette.
    #[error("unknown species id {species} (palette defines species 1..={max_species})")]
    UnknownSpecies {
        /// The offending species id.
        species: i64,
        /// Highest species id the palette defines.
        max_species: usize,
    },

    /// Two operations in the same batch target the same position.
    #[error("more than one operation targets {0} in a single iteration")]
    DuplicateOperation(Position),

    /// The configured palette cannot be used.
    #[error("invalid species palette: {reason}")]
    InvalidPalette {
        /// Explanation of what is wrong with the palette.
        reason: String,
    },
}
