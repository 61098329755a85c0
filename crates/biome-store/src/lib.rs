//! Persistence for the Biome simulation.
//!
//! Documents move through this crate at the edges of a run:
//!
//! ```text
//! input.yaml --load_document--> Simulation --export_final_state--> StateWriter
//!                                        \--export_history-------> write_render_feed
//! ```
//!
//! The simulation core only depends on the document shape, not on the
//! encoding used here.
//!
//! # Modules
//!
//! - [`document`] -- Loading and encoding world documents
//! - [`state_file`] -- [`StateWriter`] trait and the `output.yaml` writer
//! - [`render_feed`] -- JSON render feed for the animation page
//! - [`error`] -- Shared error types

pub mod document;
pub mod error;
pub mod render_feed;
pub mod state_file;

// Re-export primary types for convenience.
pub use document::{encode_document, load_document, parse_document};
pub use error::StoreError;
pub use render_feed::{read_render_feed, write_render_feed};
pub use state_file::{Download, OUTPUT_FILE_NAME, StateWriter, YAML_CONTENT_TYPE, YamlStateFile};
