//! Shared application state for the Observer API server.
//!
//! [`AppState`] holds the most recently published run. The engine
//! publishes once the run completes and its outputs are written; until
//! then the run-specific endpoints answer 404.

use std::sync::Arc;

use biome_core::Simulation;
use biome_types::{RenderFeed, RunId, WorldDocument};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

/// A finished run as served by the REST endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRun {
    /// Identifier of the run.
    pub run_id: RunId,
    /// When the run was published.
    pub completed_at: DateTime<Utc>,
    /// Every recorded snapshot, for the animation page.
    pub feed: RenderFeed,
    /// Final world state in the persisted document shape.
    pub final_state: WorldDocument,
}

impl PublishedRun {
    /// Capture the exports of a simulation, stamped with the current time.
    pub fn from_simulation(simulation: &Simulation) -> Self {
        Self {
            run_id: simulation.run_id(),
            completed_at: Utc::now(),
            feed: simulation.export_history(),
            final_state: simulation.export_final_state(),
        }
    }
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The latest published run, if any.
    pub run: Arc<RwLock<Option<PublishedRun>>>,
}

impl AppState {
    /// Create a new application state with nothing published.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published run.
    pub async fn publish(&self, run: PublishedRun) {
        info!(
            run_id = %run.run_id,
            snapshots = run.feed.life.len(),
            "Run published to observer"
        );
        *self.run.write().await = Some(run);
    }
}
