//! Configuration loading and typed config structures for the Biome simulation.
//!
//! The configuration lives in `biome-config.yaml`. This module defines
//! strongly-typed structs that mirror the YAML structure and a loader that
//! reads, overrides and validates it. Every field has a default, so an
//! empty file (or no file at all) yields a usable configuration.
//!
//! The rule thresholds are deliberately not configurable; see
//! [`biome_world::rules`].

use std::path::{Path, PathBuf};

use biome_types::ScanStrategy;
use biome_world::{DEFAULT_COLORS, SpeciesPalette};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `biome-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Seeding and scan strategy.
    #[serde(default)]
    pub world: WorldConfig,

    /// Species palette.
    #[serde(default)]
    pub species: SpeciesConfig,

    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Observer HTTP server.
    #[serde(default)]
    pub observer: ObserverConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override file values:
    /// - `BIOME_INPUT` overrides `paths.input`
    /// - `BIOME_OUTPUT_DIR` overrides `paths.output_dir`
    /// - `BIOME_OBSERVER_PORT` overrides `observer.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value (or override) is unusable.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value (or override) is unusable.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml rejects an empty document; treat it as "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `BIOME_OBSERVER_PORT` is not a
    /// valid port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("BIOME_INPUT") {
            self.paths.input = PathBuf::from(val);
        }
        if let Some(val) = lookup("BIOME_OUTPUT_DIR") {
            self.paths.output_dir = PathBuf::from(val);
        }
        if let Some(val) = lookup("BIOME_OBSERVER_PORT") {
            self.observer.port = val.parse().map_err(|e| ConfigError::Invalid {
                reason: format!("BIOME_OBSERVER_PORT={val:?}: {e}"),
            })?;
        }
        Ok(())
    }

    /// Check values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unusable species palette.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.palette().map(|_| ())
    }

    /// Build the validated species palette.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the palette lacks the reserved
    /// empty entry plus at least one species color.
    pub fn palette(&self) -> Result<SpeciesPalette, ConfigError> {
        SpeciesPalette::new(self.species.palette.clone()).map_err(|e| ConfigError::Invalid {
            reason: e.to_string(),
        })
    }
}

/// World-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Seed for birth-parent selection. `None` seeds from the OS, so runs
    /// with tied births differ from one another.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Which positions the decision phase visits.
    #[serde(default)]
    pub scan: ScanStrategy,
}

/// Species palette configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpeciesConfig {
    /// Ordered colors; index 0 is the reserved empty entry and index `k`
    /// colors species `k`.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
        }
    }
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathsConfig {
    /// Initial world document.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory that receives the persisted final state.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Render feed JSON consumed by the animation page.
    #[serde(default = "default_render_feed")]
    pub render_feed: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output_dir: default_output_dir(),
            render_feed: default_render_feed(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log a text picture of the grid after every iteration.
    #[serde(default)]
    pub dump_grid: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dump_grid: false,
        }
    }
}

/// Observer HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObserverConfig {
    /// Serve the finished run over HTTP after writing the outputs.
    #[serde(default)]
    pub enabled: bool,

    /// Bind address.
    #[serde(default = "default_observer_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_observer_port")]
    pub port: u16,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_observer_host(),
            port: default_observer_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_palette() -> Vec<String> {
    DEFAULT_COLORS.iter().map(|&c| c.to_owned()).collect()
}

fn default_input() -> PathBuf {
    PathBuf::from("input.yaml")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_render_feed() -> PathBuf {
    PathBuf::from("simulation.json")
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_observer_host() -> String {
    "127.0.0.1".to_owned()
}

const fn default_observer_port() -> u16 {
    8080
}
