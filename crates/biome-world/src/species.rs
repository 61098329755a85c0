//! Species registry: which species ids exist and how they are drawn.
//!
//! The palette is an ordered list of display colors. Index 0 is reserved for
//! empty cells and never belongs to a live species, so a palette of `K + 1`
//! colors defines species `1..=K`.

use biome_types::Species;

use crate::error::WorldError;

/// Default colors: the reserved empty entry followed by four species.
pub const DEFAULT_COLORS: [&str; 5] = ["black", "yellow", "blue", "red", "orange"];

/// Validated species registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesPalette {
    colors: Vec<String>,
}

impl SpeciesPalette {
    /// Build a palette from an ordered color list.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidPalette`] unless the list holds the
    /// reserved empty entry plus at least one species color, all non-blank.
    pub fn new(colors: Vec<String>) -> Result<Self, WorldError> {
        if colors.len() < 2 {
            return Err(WorldError::InvalidPalette {
                reason: format!(
                    "need the reserved empty color plus at least one species, got {} entries",
                    colors.len()
                ),
            });
        }
        if let Some(index) = colors.iter().position(|c| c.trim().is_empty()) {
            return Err(WorldError::InvalidPalette {
                reason: format!("color at index {index} is blank"),
            });
        }
        Ok(Self { colors })
    }

    /// Number of live species the palette defines.
    pub fn species_count(&self) -> usize {
        self.colors.len().saturating_sub(1)
    }

    /// Validate a raw species id.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownSpecies`] for 0, a negative id or any id
    /// past the end of the palette.
    pub fn resolve(&self, id: i64) -> Result<Species, WorldError> {
        let species = u32::try_from(id)
            .ok()
            .and_then(Species::new)
            .ok_or_else(|| self.unknown(id))?;
        self.color(species)?;
        Ok(species)
    }

    /// Display color of a live species.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownSpecies`] if the palette has no entry
    /// for the species.
    pub fn color(&self, species: Species) -> Result<&str, WorldError> {
        usize::try_from(species.id())
            .ok()
            .and_then(|index| self.colors.get(index))
            .map(String::as_str)
            .ok_or_else(|| self.unknown(i64::from(species.id())))
    }

    fn unknown(&self, species: i64) -> WorldError {
        WorldError::UnknownSpecies {
            species,
            max_species: self.species_count(),
        }
    }
}

impl Default for SpeciesPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|&c| c.to_owned()).collect(),
        }
    }
}
