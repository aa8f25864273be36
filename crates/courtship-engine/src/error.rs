//! Error types for the simulation binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and simulation execution.

/// Top-level error for the simulation binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: courtship_core::config::ConfigError,
    },

    /// Environment setup failed.
    #[error("environment error: {source}")]
    Environment {
        /// The underlying environment error.
        #[from]
        source: courtship_core::environment::EnvironmentError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: courtship_core::runner::RunnerError,
    },

    /// Writing the result report failed.
    #[error("report error: {message}")]
    Report {
        /// Description of the report failure.
        message: String,
    },
}
