//! The simulation driver: construction, the bounded iteration loop and
//! export of results.
//!
//! A [`Simulation`] moves through [`SimulationPhase`]s:
//!
//! ```text
//! Constructed --run--> Running --(I iterations)--> Completed
//!                         \--(invariant violation)--> Failed
//! ```
//!
//! [`Simulation::run`] is accepted exactly once. Both exports can be taken
//! in any phase; before a run they reflect the initial state.

use std::fmt;

use biome_types::{
    OrganismRecord, Position, RenderFeed, RunId, ScanStrategy, WorldDocument, WorldSettings,
};
use biome_world::{Grid, SpeciesPalette, WorldError};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::history::History;
use crate::tick::{self, IterationSummary};

/// Errors raised while building or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The grid side length is not a positive 32-bit value.
    #[error("invalid grid size {cells}: must be a positive 32-bit value")]
    InvalidGridSize {
        /// The rejected size.
        cells: i64,
    },

    /// The iteration count is not a positive 32-bit value.
    #[error("invalid iteration count {iterations}: must be a positive 32-bit value")]
    InvalidIterations {
        /// The rejected count.
        iterations: i64,
    },

    /// An initial organism lies outside the grid.
    #[error("organism at ({x}, {y}) is outside the {cells}x{cells} grid")]
    OutOfBounds {
        /// Column as given in the input.
        x: i64,
        /// Row as given in the input.
        y: i64,
        /// Grid side length.
        cells: u32,
    },

    /// An initial organism names a species the palette does not define.
    #[error("unknown species {species}: palette defines species 1..={max_species}")]
    UnknownSpecies {
        /// The rejected species id.
        species: i64,
        /// Highest valid species id.
        max_species: usize,
    },

    /// The requested operation is not allowed in the current phase.
    #[error("cannot {operation} a simulation that is {phase}")]
    InvalidState {
        /// What was attempted.
        operation: &'static str,
        /// The phase the simulation was in.
        phase: SimulationPhase,
    },

    /// A grid invariant was violated while running.
    #[error("world invariant violated: {source}")]
    Invariant {
        /// The underlying grid error.
        #[from]
        source: WorldError,
    },
}

/// Lifecycle phase of a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    /// Built and validated; the initial snapshot is recorded.
    Constructed,
    /// Iterations are being executed.
    Running,
    /// All iterations finished.
    Completed,
    /// A run aborted on an invariant violation.
    Failed,
}

impl fmt::Display for SimulationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Constructed => "constructed",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Callback invoked after each iteration is applied.
///
/// The engine uses this for progress logging; tests use it to watch the
/// grid evolve.
pub trait IterationCallback: Send {
    /// Called after an iteration's batch has been applied and recorded.
    fn on_iteration(&mut self, summary: &IterationSummary, grid: &Grid);
}

/// A no-op iteration callback.
pub struct NoOpCallback;

impl IterationCallback for NoOpCallback {
    fn on_iteration(&mut self, _summary: &IterationSummary, _grid: &Grid) {}
}

/// A bounded multi-species Game of Life run.
#[derive(Debug, Clone)]
pub struct Simulation {
    run_id: RunId,
    iterations: u32,
    grid: Grid,
    palette: SpeciesPalette,
    strategy: ScanStrategy,
    history: History,
    phase: SimulationPhase,
}

impl Simulation {
    /// Validate the settings and place the initial organisms.
    ///
    /// A later organism at an already-occupied position replaces the
    /// earlier one. The initial state is recorded as history index 0.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidGridSize`] or
    /// [`SimulationError::InvalidIterations`] for non-positive settings,
    /// [`SimulationError::OutOfBounds`] for an organism outside `[0, N)`,
    /// and [`SimulationError::UnknownSpecies`] for a species the palette
    /// does not define.
    pub fn new(
        settings: WorldSettings,
        organisms: &[OrganismRecord],
        palette: SpeciesPalette,
        strategy: ScanStrategy,
    ) -> Result<Self, SimulationError> {
        let cells = u32::try_from(settings.cells)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(SimulationError::InvalidGridSize {
                cells: settings.cells,
            })?;
        let iterations = u32::try_from(settings.iterations)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(SimulationError::InvalidIterations {
                iterations: settings.iterations,
            })?;

        let mut grid = Grid::new(cells)?;
        for record in organisms {
            let position = position_in(record, cells)?;
            let Ok(species) = palette.resolve(record.species) else {
                return Err(SimulationError::UnknownSpecies {
                    species: record.species,
                    max_species: palette.species_count(),
                });
            };
            if let Some(previous) = grid.insert(position, species)? {
                warn!(
                    %position,
                    previous = previous.id(),
                    replacement = species.id(),
                    "Duplicate organism position, keeping the later entry"
                );
            }
        }

        let capacity = usize::try_from(iterations).unwrap_or(0).saturating_add(1);
        let mut history = History::with_capacity(capacity);
        history.record(grid.snapshot(&palette)?);

        let run_id = RunId::new();
        info!(
            %run_id,
            cells,
            iterations,
            population = grid.population(),
            species = palette.species_count(),
            ?strategy,
            "Simulation constructed"
        );

        Ok(Self {
            run_id,
            iterations,
            grid,
            palette,
            strategy,
            history,
            phase: SimulationPhase::Constructed,
        })
    }

    /// Build a simulation from a loaded world document.
    ///
    /// # Errors
    ///
    /// Same as [`Simulation::new`].
    pub fn from_document(
        document: &WorldDocument,
        palette: SpeciesPalette,
        strategy: ScanStrategy,
    ) -> Result<Self, SimulationError> {
        Self::new(document.world, &document.organisms, palette, strategy)
    }

    /// Run every iteration without observing progress.
    ///
    /// # Errors
    ///
    /// See [`Simulation::run_with_callback`].
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&History, SimulationError> {
        self.run_with_callback(rng, &mut NoOpCallback)
    }

    /// Run every iteration, calling `callback` after each one.
    ///
    /// `rng` is consulted only to break ties between species that qualify
    /// for the same birth. There is no early exit: a stable or empty grid
    /// keeps being iterated until the configured count is reached.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidState`] unless the simulation is
    /// freshly constructed, and [`SimulationError::Invariant`] if a batch
    /// fails validation. The simulation is then [`SimulationPhase::Failed`].
    pub fn run_with_callback<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        callback: &mut dyn IterationCallback,
    ) -> Result<&History, SimulationError> {
        if self.phase != SimulationPhase::Constructed {
            return Err(SimulationError::InvalidState {
                operation: "run",
                phase: self.phase,
            });
        }
        self.phase = SimulationPhase::Running;
        info!(
            run_id = %self.run_id,
            iterations = self.iterations,
            "Simulation starting"
        );

        if let Err(e) = self.iterate(rng, callback) {
            self.phase = SimulationPhase::Failed;
            return Err(e);
        }

        self.phase = SimulationPhase::Completed;
        info!(
            run_id = %self.run_id,
            snapshots = self.history.len(),
            population = self.grid.population(),
            "Simulation completed"
        );
        Ok(&self.history)
    }

    fn iterate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        callback: &mut dyn IterationCallback,
    ) -> Result<(), SimulationError> {
        for iteration in 1..=self.iterations {
            let summary = tick::run_iteration(&mut self.grid, iteration, self.strategy, rng)?;
            let index = self.history.record(self.grid.snapshot(&self.palette)?);
            debug!(iteration, index, "Snapshot recorded");
            callback.on_iteration(&summary, &self.grid);
        }
        Ok(())
    }

    /// All recorded snapshots with the grid size, for the animation page.
    pub fn export_history(&self) -> RenderFeed {
        self.history.to_render_feed(self.grid.cells())
    }

    /// The current grid in the persisted document shape.
    ///
    /// Only live cells are listed, in x-major order.
    pub fn export_final_state(&self) -> WorldDocument {
        WorldDocument {
            world: WorldSettings {
                cells: i64::from(self.grid.cells()),
                iterations: i64::from(self.iterations),
            },
            organisms: self
                .grid
                .organisms()
                .map(|(position, species)| OrganismRecord {
                    x_pos: i64::from(position.x),
                    y_pos: i64::from(position.y),
                    species: i64::from(species.id()),
                })
                .collect(),
        }
    }

    /// Identifier of this run.
    pub const fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Grid side length.
    pub const fn cells(&self) -> u32 {
        self.grid.cells()
    }

    /// Configured iteration count.
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> SimulationPhase {
        self.phase
    }

    /// The current grid.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The species palette.
    pub const fn palette(&self) -> &SpeciesPalette {
        &self.palette
    }

    /// Recorded snapshots so far.
    pub const fn history(&self) -> &History {
        &self.history
    }
}

fn position_in(record: &OrganismRecord, cells: u32) -> Result<Position, SimulationError> {
    let coordinate = |v: i64| u32::try_from(v).ok().filter(|&c| c < cells);
    match (coordinate(record.x_pos), coordinate(record.y_pos)) {
        (Some(x), Some(y)) => Ok(Position::new(x, y)),
        _ => Err(SimulationError::OutOfBounds {
            x: record.x_pos,
            y: record.y_pos,
            cells,
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use biome_types::Species;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn settings(cells: i64, iterations: i64) -> WorldSettings {
        WorldSettings { cells, iterations }
    }

    fn org(x_pos: i64, y_pos: i64, species: i64) -> OrganismRecord {
        OrganismRecord {
            x_pos,
            y_pos,
            species,
        }
    }

    fn build(
        cells: i64,
        iterations: i64,
        organisms: &[OrganismRecord],
    ) -> Result<Simulation, SimulationError> {
        Simulation::new(
            settings(cells, iterations),
            organisms,
            SpeciesPalette::default(),
            ScanStrategy::Exhaustive,
        )
    }

    #[test]
    fn rejects_non_positive_settings() {
        assert!(matches!(
            build(0, 1, &[]),
            Err(SimulationError::InvalidGridSize { cells: 0 })
        ));
        assert!(matches!(
            build(-3, 1, &[]),
            Err(SimulationError::InvalidGridSize { .. })
        ));
        assert!(matches!(
            build(3, 0, &[]),
            Err(SimulationError::InvalidIterations { iterations: 0 })
        ));
        assert!(matches!(
            build(3, -1, &[]),
            Err(SimulationError::InvalidIterations { .. })
        ));
    }

    #[test]
    fn rejects_out_of_bounds_organisms() {
        for bad in [org(3, 0, 1), org(0, 3, 1), org(-1, 0, 1), org(0, -1, 1)] {
            assert!(
                matches!(
                    build(3, 1, &[bad]),
                    Err(SimulationError::OutOfBounds { cells: 3, .. })
                ),
                "{bad:?} should be out of bounds"
            );
        }
    }

    #[test]
    fn rejects_unknown_species() {
        // Default palette defines species 1..=4.
        let result = build(3, 1, &[org(0, 0, 5)]);
        assert!(matches!(
            result,
            Err(SimulationError::UnknownSpecies {
                species: 5,
                max_species: 4
            })
        ));
        assert!(matches!(
            build(3, 1, &[org(0, 0, 0)]),
            Err(SimulationError::UnknownSpecies { species: 0, .. })
        ));
        assert!(matches!(
            build(3, 1, &[org(0, 0, -1)]),
            Err(SimulationError::UnknownSpecies { species: -1, .. })
        ));
    }

    #[test]
    fn later_duplicate_replaces_earlier() {
        let sim = build(3, 1, &[org(1, 1, 1), org(1, 1, 3)]).unwrap();
        assert_eq!(sim.grid().get(Position::new(1, 1)), Species::new(3));
        assert_eq!(sim.grid().population(), 1);
    }

    #[test]
    fn construction_records_initial_snapshot() {
        let sim = build(4, 2, &[org(0, 0, 2)]).unwrap();
        assert_eq!(sim.phase(), SimulationPhase::Constructed);
        assert_eq!(sim.history().len(), 1);
        let initial = sim.history().initial().unwrap();
        assert_eq!(initial.get(0, 0).map(|o| o.color.as_str()), Some("blue"));
    }

    #[test]
    fn second_run_is_rejected() {
        let mut sim = build(3, 1, &[]).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        sim.run(&mut rng).unwrap();
        assert_eq!(sim.phase(), SimulationPhase::Completed);

        match sim.run(&mut rng) {
            Err(SimulationError::InvalidState { operation, phase }) => {
                assert_eq!(operation, "run");
                assert_eq!(phase, SimulationPhase::Completed);
            }
            other => panic!("expected InvalidState, got {other:?}"),
        }
        assert_eq!(sim.history().len(), 2);
    }

    #[test]
    fn invariant_violation_fails_the_run_for_good() {
        let block = [org(1, 1, 2), org(1, 2, 2), org(2, 1, 2), org(2, 2, 2)];
        let mut sim = build(4, 3, &block).unwrap();
        // Species 2 has no color in a palette that only defines species 1,
        // so recording the first snapshot breaks.
        sim.palette = SpeciesPalette::new(vec!["black".to_owned(), "yellow".to_owned()]).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);

        match sim.run(&mut rng) {
            Err(SimulationError::Invariant {
                source: WorldError::UnknownSpecies { species: 2, .. },
            }) => {}
            other => panic!("expected Invariant, got {other:?}"),
        }
        assert_eq!(sim.phase(), SimulationPhase::Failed);
        assert_eq!(sim.history().len(), 1);

        match sim.run(&mut rng) {
            Err(SimulationError::InvalidState { operation, phase }) => {
                assert_eq!(operation, "run");
                assert_eq!(phase, SimulationPhase::Failed);
            }
            other => panic!("expected InvalidState, got {other:?}"),
        }
    }

    #[test]
    fn callback_sees_every_iteration() {
        struct Recorder(Vec<u32>);
        impl IterationCallback for Recorder {
            fn on_iteration(&mut self, summary: &IterationSummary, _grid: &Grid) {
                self.0.push(summary.iteration);
            }
        }

        let mut sim = build(3, 4, &[org(1, 1, 1)]).unwrap();
        let mut recorder = Recorder(Vec::new());
        sim.run_with_callback(&mut SmallRng::seed_from_u64(0), &mut recorder)
            .unwrap();
        assert_eq!(recorder.0, vec![1, 2, 3, 4]);
    }

    #[test]
    fn export_final_state_lists_live_cells_in_order() {
        let sim = build(5, 1, &[org(3, 1, 2), org(0, 4, 1), org(0, 2, 4)]).unwrap();
        let doc = sim.export_final_state();
        assert_eq!(doc.world, settings(5, 1));
        assert_eq!(doc.organisms, vec![org(0, 2, 4), org(0, 4, 1), org(3, 1, 2)]);
    }

    #[test]
    fn phase_display_is_lowercase() {
        assert_eq!(SimulationPhase::Failed.to_string(), "failed");
        let err = SimulationError::InvalidState {
            operation: "run",
            phase: SimulationPhase::Completed,
        };
        assert_eq!(err.to_string(), "cannot run a simulation that is completed");
    }
}
