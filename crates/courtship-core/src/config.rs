//! Configuration loading and typed config structures for the Courtship simulation.
//!
//! The canonical configuration lives in `courtship-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.

use std::path::Path;

use courtship_agents::{ModelParams, ParamsError};
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

    /// The model parameter block failed validation.
    #[error("invalid model parameters: {source}")]
    Params {
        /// The underlying parameter validation error.
        #[from]
        source: ParamsError,
    },

    /// A world-level field failed validation.
    #[error("invalid config: {reason}")]
    Invalid {
        /// Why the configuration was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `courtship-config.yaml`. All fields have
/// defaults matching the baseline Kalick-Hamilton experiment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, grid size, seed population).
    #[serde(default)]
    pub world: WorldConfig,

    /// Mate-choice model parameters.
    #[serde(default)]
    pub model: ModelParams,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error if any value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// a validation error if any value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded configuration.
    ///
    /// Grid dimensions must be at least 1x1. Zero agents of either
    /// gender is legal: the run simply collapses on its first round.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Params`] or [`ConfigError::Invalid`] when a
    /// value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.model.validate()?;
        if self.world.width < 1 || self.world.height < 1 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "grid dimensions must be at least 1x1, got {}x{}",
                    self.world.width, self.world.height
                ),
            });
        }
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Grid width in cells.
    #[serde(default = "default_dimension")]
    pub width: i32,

    /// Grid height in cells.
    #[serde(default = "default_dimension")]
    pub height: i32,

    /// Number of female agents in the seed population.
    #[serde(default = "default_initial_count")]
    pub initial_females: u32,

    /// Number of male agents in the seed population.
    #[serde(default = "default_initial_count")]
    pub initial_males: u32,

    /// Maximum number of rounds before the run ends.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            width: default_dimension(),
            height: default_dimension(),
            initial_females: default_initial_count(),
            initial_males: default_initial_count(),
            max_rounds: default_max_rounds(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "courtship".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_dimension() -> i32 {
    100
}

const fn default_initial_count() -> u32 {
    50
}

const fn default_max_rounds() -> u64 {
    500
}
