//! Engine binary for the Biome simulation.
//!
//! This is the main entry point that wires together configuration, the
//! input document, the simulation run, output persistence and the
//! optional observer server.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$BIOME_CONFIG` or `biome-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Load the input world document
//! 4. Build the simulation
//! 5. Run it with a seeded or OS-seeded RNG
//! 6. Write the render feed and the final state
//! 7. Publish the run and serve it, if the observer is enabled

mod error;
mod progress;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use biome_core::{Simulation, SimulationConfig};
use biome_observer::{AppState, PublishedRun, ServerConfig};
use biome_store::{StateWriter, YamlStateFile};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::progress::ProgressLogger;

/// Config file used when `BIOME_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "biome-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any step of the run fails; nothing is written
/// for a run that does not complete.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let (config, config_path) = load_config().context("loading configuration")?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("biome-engine starting");
    info!(
        config = %config_path.display(),
        seed = ?config.world.seed,
        scan = ?config.world.scan,
        input = %config.paths.input.display(),
        observer = config.observer.enabled,
        "Configuration loaded"
    );

    let simulation = run(&config)?;

    // 7. Serve the finished run.
    if config.observer.enabled {
        let app_state = Arc::new(AppState::new());
        app_state
            .publish(PublishedRun::from_simulation(&simulation))
            .await;
        let server = ServerConfig {
            host: config.observer.host.clone(),
            port: config.observer.port,
        };
        biome_observer::start_server(&server, app_state)
            .await
            .map_err(EngineError::from)
            .context("serving observer API")?;
    }

    info!("biome-engine shutdown complete");
    Ok(())
}

/// Load, run and persist one simulation.
fn run(config: &SimulationConfig) -> anyhow::Result<Simulation> {
    let palette = config.palette().map_err(EngineError::from)?;

    // 3. Load the input document.
    let document = biome_store::load_document(&config.paths.input, &palette)
        .map_err(EngineError::from)
        .with_context(|| format!("loading world from {}", config.paths.input.display()))?;

    // 4. Build the simulation.
    let mut simulation = Simulation::from_document(&document, palette, config.world.scan)
        .map_err(EngineError::from)
        .context("building simulation")?;

    // 5. Run it.
    let mut rng = config
        .world
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let mut progress = ProgressLogger::new(simulation.iterations(), config.logging.dump_grid);
    simulation
        .run_with_callback(&mut rng, &mut progress)
        .map_err(EngineError::from)
        .context("running simulation")?;
    info!(
        run_id = %simulation.run_id(),
        species = simulation.palette().species_count(),
        peak_population = progress.peak_population(),
        final_population = simulation.grid().population(),
        "Run finished"
    );

    // 6. Write outputs.
    biome_store::write_render_feed(&config.paths.render_feed, &simulation.export_history())
        .map_err(EngineError::from)
        .context("writing render feed")?;
    YamlStateFile::new(&config.paths.output_dir)
        .write(&simulation.export_final_state())
        .map_err(EngineError::from)
        .context("writing final state")?;

    Ok(simulation)
}

/// Load the configuration from `$BIOME_CONFIG` or the default path.
fn load_config() -> Result<(SimulationConfig, PathBuf), EngineError> {
    config_from(std::env::var_os("BIOME_CONFIG").map(PathBuf::from))
}

/// Load the configuration from an explicitly named file, or from the
/// default path.
///
/// Only the default path may be missing, in which case the defaults (with
/// environment overrides) are used. A named file must exist.
fn config_from(explicit: Option<PathBuf>) -> Result<(SimulationConfig, PathBuf), EngineError> {
    if let Some(path) = explicit {
        let config = SimulationConfig::from_file(&path)?;
        return Ok((config, path));
    }
    let path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let config = if path.exists() {
        SimulationConfig::from_file(&path)?
    } else {
        SimulationConfig::parse("")?
    };
    Ok((config, path))
}
