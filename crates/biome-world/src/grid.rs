//! The sparse `N x N` occupancy grid.
//!
//! Only live cells are stored. Absent entries are empty, and positions
//! outside `[0, N)` are treated as empty by neighborhood queries (the grid
//! does not wrap around).
//!
//! Mutation happens in two places only: [`Grid::insert`] while the initial
//! population is placed, and [`Grid::apply`] which commits a whole batch of
//! operations computed against the previous state.

use std::collections::{BTreeMap, BTreeSet};

use biome_types::{Operation, OrganismView, Outcome, Position, Snapshot, Species};
use tracing::trace;

use crate::cell::Cell;
use crate::error::WorldError;
use crate::species::SpeciesPalette;

/// Moore neighborhood offsets, radius 1, center excluded.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Counts of what a batch did to the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Cells born (created or overwritten).
    pub births: u32,
    /// Cells removed for isolation.
    pub isolations: u32,
    /// Cells removed for overcrowding.
    pub overcrowdings: u32,
}

/// Sparse occupancy map over a bounded square region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: u32,
    life: BTreeMap<Position, Species>,
}

impl Grid {
    /// Create an empty grid with side length `cells`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptyGrid`] if `cells` is 0.
    pub const fn new(cells: u32) -> Result<Self, WorldError> {
        if cells == 0 {
            return Err(WorldError::EmptyGrid);
        }
        Ok(Self {
            cells,
            life: BTreeMap::new(),
        })
    }

    /// Grid side length.
    pub const fn cells(&self) -> u32 {
        self.cells
    }

    /// Whether `position` lies inside the grid.
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.cells && position.y < self.cells
    }

    /// Species living at `position`, if any.
    pub fn get(&self, position: Position) -> Option<Species> {
        self.life.get(&position).copied()
    }

    /// Place a species at `position`, returning the previous occupant.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the position is outside the grid.
    pub fn insert(
        &mut self,
        position: Position,
        species: Species,
    ) -> Result<Option<Species>, WorldError> {
        self.check_bounds(position)?;
        Ok(self.life.insert(position, species))
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.life.len()
    }

    /// Whether no cell is alive.
    pub fn is_empty(&self) -> bool {
        self.life.is_empty()
    }

    /// Iterate over live cells in x-major order.
    pub fn organisms(&self) -> impl Iterator<Item = (Position, Species)> + '_ {
        self.life.iter().map(|(&position, &species)| (position, species))
    }

    /// Iterate over every position of the grid in x-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cells = self.cells;
        (0..cells).flat_map(move |x| (0..cells).map(move |y| Position::new(x, y)))
    }

    /// In-bounds Moore neighbors of `position`.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let x = position.x.checked_add_signed(dx)?;
            let y = position.y.checked_add_signed(dy)?;
            let neighbor = Position::new(x, y);
            self.contains(neighbor).then_some(neighbor)
        })
    }

    /// Live cells plus every in-bounds neighbor of a live cell.
    ///
    /// Any position outside this set is empty with an empty neighborhood,
    /// so no rule can fire there.
    pub fn frontier(&self) -> BTreeSet<Position> {
        let mut frontier = BTreeSet::new();
        for &position in self.life.keys() {
            frontier.insert(position);
            frontier.extend(self.neighbors(position));
        }
        frontier
    }

    /// The cell at `position`: the occupant if alive, otherwise a probe.
    pub fn cell(&self, position: Position) -> Cell {
        self.get(position)
            .map_or_else(|| Cell::probe(position), |species| Cell::new(position, Some(species)))
    }

    /// Commit one iteration's operations.
    ///
    /// The whole batch is validated before anything changes: every position
    /// must be in bounds and targeted at most once. Deaths remove the cell if
    /// present; births create the cell or overwrite its species. Because
    /// positions are distinct, the order of operations does not matter.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] or [`WorldError::DuplicateOperation`]
    /// if the batch breaks those invariants; the grid is left untouched.
    pub fn apply(&mut self, operations: &[Operation]) -> Result<ApplySummary, WorldError> {
        let mut targets = BTreeSet::new();
        for op in operations {
            self.check_bounds(op.position)?;
            if !targets.insert(op.position) {
                return Err(WorldError::DuplicateOperation(op.position));
            }
        }

        let mut summary = ApplySummary::default();
        for op in operations {
            match op.outcome {
                Outcome::Isolated => {
                    self.life.remove(&op.position);
                    summary.isolations = summary.isolations.saturating_add(1);
                }
                Outcome::Overcrowded => {
                    self.life.remove(&op.position);
                    summary.overcrowdings = summary.overcrowdings.saturating_add(1);
                }
                Outcome::Birth { parent } => {
                    self.life.insert(op.position, parent);
                    summary.births = summary.births.saturating_add(1);
                }
            }
            trace!(position = %op.position, outcome = ?op.outcome, "Operation applied");
        }
        Ok(summary)
    }

    /// Capture every live cell with its display color.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownSpecies`] if a live species has no
    /// palette entry.
    pub fn snapshot(&self, palette: &SpeciesPalette) -> Result<Snapshot, WorldError> {
        let mut snapshot = Snapshot::new();
        for (position, species) in self.organisms() {
            snapshot.insert(OrganismView {
                x: position.x,
                y: position.y,
                species,
                color: palette.color(species)?.to_owned(),
            });
        }
        Ok(snapshot)
    }

    /// Plain-text picture of the grid, one row per `y`, `.` for empty cells
    /// and the species id (base 36, `#` past 35) for live ones.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for y in 0..self.cells {
            for x in 0..self.cells {
                let glyph = self
                    .get(Position::new(x, y))
                    .map_or('.', |s| char::from_digit(s.id(), 36).unwrap_or('#'));
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }

    const fn check_bounds(&self, position: Position) -> Result<(), WorldError> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(WorldError::OutOfBounds {
                position,
                cells: self.cells,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sp(id: u32) -> Species {
        Species::new(id).unwrap()
    }

    fn op(x: u32, y: u32, outcome: Outcome) -> Operation {
        Operation {
            position: Position::new(x, y),
            outcome,
        }
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert!(matches!(Grid::new(0), Err(WorldError::EmptyGrid)));
    }

    #[test]
    fn insert_out_of_bounds_fails() {
        let mut grid = Grid::new(3).unwrap();
        assert!(grid.insert(Position::new(2, 2), sp(1)).is_ok());
        assert!(matches!(
            grid.insert(Position::new(3, 0), sp(1)),
            Err(WorldError::OutOfBounds { cells: 3, .. })
        ));
    }

    #[test]
    fn neighbors_clip_at_edges() {
        let grid = Grid::new(3).unwrap();
        assert_eq!(grid.neighbors(Position::new(0, 0)).count(), 3);
        assert_eq!(grid.neighbors(Position::new(1, 0)).count(), 5);
        assert_eq!(grid.neighbors(Position::new(1, 1)).count(), 8);
        assert_eq!(grid.neighbors(Position::new(2, 2)).count(), 3);
        assert_eq!(Grid::new(1).unwrap().neighbors(Position::new(0, 0)).count(), 0);
    }

    #[test]
    fn positions_cover_grid_x_major() {
        let grid = Grid::new(2).unwrap();
        let all: Vec<Position> = grid.positions().collect();
        assert_eq!(
            all,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1)
            ]
        );
    }

    #[test]
    fn frontier_is_live_cells_and_their_neighbors() {
        let mut grid = Grid::new(5).unwrap();
        grid.insert(Position::new(0, 0), sp(1)).unwrap();
        let frontier = grid.frontier();
        assert_eq!(frontier.len(), 4);
        assert!(frontier.contains(&Position::new(1, 1)));
        assert!(!frontier.contains(&Position::new(2, 2)));
    }

    #[test]
    fn apply_births_and_deaths() {
        let mut grid = Grid::new(3).unwrap();
        grid.insert(Position::new(0, 0), sp(1)).unwrap();
        grid.insert(Position::new(1, 1), sp(2)).unwrap();
        grid.insert(Position::new(2, 2), sp(1)).unwrap();

        let summary = grid
            .apply(&[
                op(0, 0, Outcome::Isolated),
                op(1, 1, Outcome::Birth { parent: sp(3) }),
                op(2, 2, Outcome::Overcrowded),
                op(0, 2, Outcome::Birth { parent: sp(1) }),
            ])
            .unwrap();

        assert_eq!(
            summary,
            ApplySummary {
                births: 2,
                isolations: 1,
                overcrowdings: 1
            }
        );
        assert_eq!(grid.get(Position::new(0, 0)), None);
        // Birth over an occupied cell overwrites the species.
        assert_eq!(grid.get(Position::new(1, 1)), Some(sp(3)));
        assert_eq!(grid.get(Position::new(2, 2)), None);
        assert_eq!(grid.get(Position::new(0, 2)), Some(sp(1)));
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn death_of_absent_cell_is_a_no_op() {
        let mut grid = Grid::new(2).unwrap();
        grid.apply(&[op(1, 1, Outcome::Isolated)]).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn apply_rejects_invalid_batches_without_mutating() {
        let mut grid = Grid::new(3).unwrap();
        grid.insert(Position::new(1, 1), sp(1)).unwrap();
        let before = grid.clone();

        let result = grid.apply(&[op(1, 1, Outcome::Isolated), op(3, 1, Outcome::Isolated)]);
        assert!(matches!(result, Err(WorldError::OutOfBounds { .. })));
        assert_eq!(grid, before);

        let result = grid.apply(&[
            op(1, 1, Outcome::Isolated),
            op(1, 1, Outcome::Birth { parent: sp(2) }),
        ]);
        assert!(matches!(result, Err(WorldError::DuplicateOperation(_))));
        assert_eq!(grid, before);
    }

    #[test]
    fn apply_order_does_not_matter() {
        let mut base = Grid::new(4).unwrap();
        for (x, y, s) in [(0, 0, 1), (1, 1, 2), (2, 2, 1), (3, 3, 3)] {
            base.insert(Position::new(x, y), sp(s)).unwrap();
        }
        let batch = vec![
            op(0, 0, Outcome::Isolated),
            op(1, 1, Outcome::Overcrowded),
            op(2, 1, Outcome::Birth { parent: sp(2) }),
            op(3, 3, Outcome::Birth { parent: sp(1) }),
            op(0, 3, Outcome::Birth { parent: sp(4) }),
        ];

        let mut forward = base.clone();
        forward.apply(&batch).unwrap();

        let mut reversed_batch = batch.clone();
        reversed_batch.reverse();
        let mut reversed = base.clone();
        reversed.apply(&reversed_batch).unwrap();

        let mut rotated_batch = batch;
        rotated_batch.rotate_left(2);
        let mut rotated = base;
        rotated.apply(&rotated_batch).unwrap();

        assert_eq!(forward, reversed);
        assert_eq!(forward, rotated);
    }

    #[test]
    fn snapshot_carries_palette_colors() {
        let mut grid = Grid::new(3).unwrap();
        grid.insert(Position::new(2, 0), sp(3)).unwrap();
        let snapshot = grid.snapshot(&SpeciesPalette::default()).unwrap();
        let view = snapshot.get(2, 0).unwrap();
        assert_eq!(view.color, "red");
        assert_eq!(view.species, sp(3));
        assert_eq!(snapshot.population(), 1);
    }

    #[test]
    fn snapshot_fails_for_species_outside_palette() {
        let mut grid = Grid::new(2).unwrap();
        grid.insert(Position::new(0, 0), sp(9)).unwrap();
        assert!(matches!(
            grid.snapshot(&SpeciesPalette::default()),
            Err(WorldError::UnknownSpecies { species: 9, .. })
        ));
    }

    #[test]
    fn render_text_draws_rows_by_y() {
        let mut grid = Grid::new(3).unwrap();
        grid.insert(Position::new(2, 0), sp(1)).unwrap();
        grid.insert(Position::new(0, 1), sp(2)).unwrap();
        assert_eq!(grid.render_text(), "..1\n2..\n...\n");
    }
}
