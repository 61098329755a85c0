//! A single grid position and its neighborhood.
//!
//! A [`Cell`] is a position plus an optional occupant. Occupied cells are
//! read from the grid; empty positions are evaluated through a transient
//! probe cell so that births can happen where nothing lives yet.

use std::collections::BTreeMap;

use biome_types::{Outcome, Position, Species};
use rand::Rng;

use crate::grid::Grid;
use crate::rules;

/// Species -> number of neighbors of that species.
///
/// Empty and out-of-bounds neighbors contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Census(BTreeMap<Species, u8>);

impl Census {
    /// Number of neighbors of the given species.
    pub fn count(&self, species: Species) -> u8 {
        self.0.get(&species).copied().unwrap_or(0)
    }

    /// Species whose neighbor count equals `count`, in id order.
    pub fn species_with_count(&self, count: u8) -> impl Iterator<Item = Species> + '_ {
        self.0
            .iter()
            .filter(move |&(_, &n)| n == count)
            .map(|(&species, _)| species)
    }

    fn record(&mut self, species: Species) {
        let entry = self.0.entry(species).or_insert(0);
        *entry = entry.saturating_add(1);
    }
}

impl FromIterator<(Species, u8)> for Census {
    fn from_iter<I: IntoIterator<Item = (Species, u8)>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|&(_, n)| n > 0).collect())
    }
}

/// One grid position and whatever lives there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    occupant: Option<Species>,
}

impl Cell {
    /// Create a cell with an explicit occupant.
    pub const fn new(position: Position, occupant: Option<Species>) -> Self {
        Self { position, occupant }
    }

    /// Create an empty probe cell used to test an empty position for birth.
    pub const fn probe(position: Position) -> Self {
        Self {
            position,
            occupant: None,
        }
    }

    /// Whether a species occupies the cell.
    pub const fn is_alive(&self) -> bool {
        self.occupant.is_some()
    }

    /// Count live Moore neighbors by species.
    pub fn census(&self, grid: &Grid) -> Census {
        let mut census = Census::default();
        for neighbor in grid.neighbors(self.position) {
            if let Some(species) = grid.get(neighbor) {
                census.record(species);
            }
        }
        census
    }

    /// Decide this cell's fate for the coming iteration.
    ///
    /// `grid` is the frozen state at the start of the iteration; the
    /// returned outcome is applied later, together with every other
    /// cell's decision.
    pub fn decide<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> Option<Outcome> {
        rules::evaluate(self.occupant, &self.census(grid), rng)
    }
}
