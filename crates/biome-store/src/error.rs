//! Error types for the persistence layer.
//!
//! All errors are propagated via [`StoreError`] which wraps the underlying
//! I/O and codec errors with the path or value that caused them.

use std::path::PathBuf;

/// Errors that can occur while loading or writing documents.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The input document is missing, unreadable or not a world document.
    #[error("input document {path} not found or unusable: {reason}")]
    InputNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// An organism names a species the palette does not define.
    #[error("unknown species {species} in input: palette defines species 1..={max_species}")]
    UnknownSpecies {
        /// The rejected species id.
        species: i64,
        /// Highest valid species id.
        max_species: usize,
    },

    /// Writing or reading an output file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A YAML encoding error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// A JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
