//! Reading and encoding world documents.
//!
//! A world document holds the grid settings and the organism list:
//!
//! ```yaml
//! world:
//!   cells: 5
//!   iterations: 3
//! organisms:
//!   - x_pos: 1
//!     y_pos: 2
//!     species: 1
//! ```
//!
//! The same shape is used for the initial input and for the persisted
//! final state, so an output can be fed back in as the next input.

use std::path::Path;

use biome_types::WorldDocument;
use biome_world::SpeciesPalette;
use tracing::{debug, info};

use crate::error::StoreError;

/// Load and check a world document from `path`.
///
/// Only species ids are checked here; grid bounds and settings are
/// validated when the simulation is built.
///
/// # Errors
///
/// Returns [`StoreError::InputNotFound`] if the file is missing,
/// unreadable or not a world document, and [`StoreError::UnknownSpecies`]
/// if an organism names a species outside the palette.
pub fn load_document(path: &Path, palette: &SpeciesPalette) -> Result<WorldDocument, StoreError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StoreError::InputNotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let document = parse_document(&contents).map_err(|e| StoreError::InputNotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    check_species(&document, palette)?;

    info!(
        path = %path.display(),
        cells = document.world.cells,
        iterations = document.world.iterations,
        organisms = document.organisms.len(),
        "World document loaded"
    );
    Ok(document)
}

/// Parse a world document from YAML text.
///
/// # Errors
///
/// Returns [`StoreError::Yaml`] if the text is not a world document.
pub fn parse_document(yaml: &str) -> Result<WorldDocument, StoreError> {
    Ok(serde_yml::from_str(yaml)?)
}

/// Encode a world document as YAML text.
///
/// # Errors
///
/// Returns [`StoreError::Yaml`] if encoding fails.
pub fn encode_document(document: &WorldDocument) -> Result<String, StoreError> {
    let yaml = serde_yml::to_string(document)?;
    debug!(bytes = yaml.len(), "World document encoded");
    Ok(yaml)
}

fn check_species(document: &WorldDocument, palette: &SpeciesPalette) -> Result<(), StoreError> {
    for organism in &document.organisms {
        if palette.resolve(organism.species).is_err() {
            return Err(StoreError::UnknownSpecies {
                species: organism.species,
                max_species: palette.species_count(),
            });
        }
    }
    Ok(())
}
