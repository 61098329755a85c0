//! Core structs for the Biome simulation.
//!
//! Covers grid coordinates, species ids, per-iteration operations, the
//! render feed consumed by the animation page and the persisted world
//! document.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Outcome;

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// A live species identifier.
///
/// Species ids start at 1. Emptiness is modelled as the absence of a
/// species (`Option<Species>`), so there is no "species 0" value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Species(NonZeroU32);

impl Species {
    /// Build a species from its numeric id, returning `None` for 0.
    pub const fn new(id: u32) -> Option<Self> {
        match NonZeroU32::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// The numeric species id (always at least 1).
    pub const fn id(self) -> u32 {
        self.0.get()
    }
}

impl core::fmt::Display for Species {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected species id (0 is reserved for "empty").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroSpeciesId;

impl core::fmt::Display for ZeroSpeciesId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("species id 0 is reserved for empty cells")
    }
}

impl TryFrom<u32> for Species {
    type Error = ZeroSpeciesId;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::new(id).ok_or(ZeroSpeciesId)
    }
}

impl From<Species> for u32 {
    fn from(species: Species) -> Self {
        species.id()
    }
}

// ---------------------------------------------------------------------------
// Position and operations
// ---------------------------------------------------------------------------

/// A grid coordinate.
///
/// The derived ordering is x-major, then y, which is the order the engine
/// scans the grid in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl Position {
    /// Create a position.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One cell's decision for an iteration, tagged with where it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    /// The cell the outcome applies to.
    pub position: Position,
    /// What happens to that cell.
    #[serde(flatten)]
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// Render feed
// ---------------------------------------------------------------------------

/// A live cell as drawn by the animation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OrganismView {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Species id.
    #[ts(as = "u32")]
    pub species: Species,
    /// Display color from the species palette.
    pub color: String,
}

/// All live cells at one point in time, keyed by x then y.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct Snapshot(BTreeMap<u32, BTreeMap<u32, OrganismView>>);

impl Snapshot {
    /// Create an empty snapshot.
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a live cell, replacing any view already recorded at its
    /// position.
    pub fn insert(&mut self, view: OrganismView) {
        self.0.entry(view.x).or_default().insert(view.y, view);
    }

    /// Look up the live cell at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Option<&OrganismView> {
        self.0.get(&x).and_then(|column| column.get(&y))
    }

    /// Number of live cells in the snapshot.
    pub fn population(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    /// Whether no cell is alive.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeMap::is_empty)
    }

    /// Iterate over live cells in x-major order.
    pub fn organisms(&self) -> impl Iterator<Item = &OrganismView> {
        self.0.values().flat_map(BTreeMap::values)
    }
}

/// Iteration-indexed history handed to the animation page.
///
/// `life[0]` is the initial configuration and `life[i]` the grid after
/// iteration `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RenderFeed {
    /// One snapshot per recorded iteration.
    pub life: Vec<Snapshot>,
    /// Grid side length.
    pub cells: u32,
}

// ---------------------------------------------------------------------------
// World document
// ---------------------------------------------------------------------------

/// World-level settings as written in an input or output document.
///
/// Kept signed so that non-positive values survive parsing and can be
/// rejected with a configuration error instead of a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSettings {
    /// Grid side length.
    pub cells: i64,
    /// Number of iterations to run.
    pub iterations: i64,
}

/// A live cell as written in an input or output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganismRecord {
    /// Column.
    pub x_pos: i64,
    /// Row.
    pub y_pos: i64,
    /// Raw species id, validated against the palette on load.
    ///
    /// Signed so that negative ids reach the palette check instead of
    /// failing to parse.
    pub species: i64,
}

/// World settings plus live cells: both the input and the persisted output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldDocument {
    /// Grid size and iteration count.
    pub world: WorldSettings,
    /// Live cells.
    #[serde(default)]
    pub organisms: Vec<OrganismRecord>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn view(x: u32, y: u32, species: u32) -> OrganismView {
        OrganismView {
            x,
            y,
            species: Species::new(species).unwrap(),
            color: "yellow".to_owned(),
        }
    }

    #[test]
    fn species_zero_is_not_a_species() {
        assert!(Species::new(0).is_none());
        assert_eq!(Species::new(3).map(Species::id), Some(3));
        assert!(serde_json::from_str::<Species>("0").is_err());
        assert_eq!(serde_json::from_str::<Species>("4").unwrap().id(), 4);
    }

    #[test]
    fn positions_order_x_major() {
        let mut positions = vec![
            Position::new(1, 0),
            Position::new(0, 2),
            Position::new(0, 1),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![Position::new(0, 1), Position::new(0, 2), Position::new(1, 0)]
        );
    }

    #[test]
    fn snapshot_is_keyed_by_x_then_y() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(view(2, 1, 1));
        snapshot.insert(view(0, 3, 2));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["2"]["1"]["species"], 1);
        assert_eq!(json["0"]["3"]["color"], "yellow");
        assert_eq!(snapshot.population(), 2);
        assert_eq!(snapshot.get(0, 3).map(|v| v.species.id()), Some(2));
        assert!(snapshot.get(3, 0).is_none());
    }

    #[test]
    fn empty_snapshot_reports_empty() {
        let snapshot = Snapshot::new();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.population(), 0);
        assert_eq!(serde_json::to_string(&snapshot).unwrap(), "{}");
    }

    #[test]
    fn operation_flattens_outcome() {
        let op = Operation {
            position: Position::new(1, 2),
            outcome: Outcome::Overcrowded,
        };
        let json = serde_json::to_value(op).unwrap();
        assert_eq!(json["result"], "overcrowded");
        assert_eq!(json["position"]["x"], 1);
    }

    #[test]
    fn world_document_reads_yaml_shape() {
        let yaml = "
world:
  cells: 5
  iterations: 2
organisms:
  - x_pos: 1
    y_pos: 2
    species: 3
";
        let doc: WorldDocument = serde_yml::from_str(yaml).unwrap();
        assert_eq!(doc.world.cells, 5);
        assert_eq!(doc.world.iterations, 2);
        assert_eq!(
            doc.organisms,
            vec![OrganismRecord {
                x_pos: 1,
                y_pos: 2,
                species: 3
            }]
        );
    }

    #[test]
    fn world_document_without_organisms_is_empty() {
        let doc: WorldDocument =
            serde_yml::from_str("world:\n  cells: 3\n  iterations: 1\n").unwrap();
        assert!(doc.organisms.is_empty());
    }
}
