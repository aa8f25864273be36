//! Simulation binary for the Courtship mate-choice experiment.
//!
//! This is the main entry point that wires together the environment,
//! seed population, and round loop. It loads configuration, runs the
//! simulation until the round limit or population collapse, and writes
//! the recorded couples to a JSON report.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `courtship-config.yaml`
//! 3. Create the environment with a seeded RNG
//! 4. Seed the starting population
//! 5. Run the round loop
//! 6. Log the partner correlation and write the result report

mod error;
mod spawner;

use std::path::Path;

use courtship_core::config::SimulationConfig;
use courtship_core::environment::Environment;
use courtship_core::portrayal::NoOpPortrayal;
use courtship_core::recorder::MemoryRecorder;
use courtship_core::runner::{self, TickCallback};
use courtship_core::tick::TickSummary;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Path of the JSON report written after a completed run.
const REPORT_PATH: &str = "courtship-results.json";

/// Logs every completed round.
struct ProgressCallback;

impl TickCallback for ProgressCallback {
    fn on_tick(&mut self, summary: &TickSummary) {
        debug!(
            round = summary.round,
            couples = summary.couples,
            deferrals = summary.deferrals,
            no_partner = summary.no_partner,
            females = summary.females,
            males = summary.males,
            "round finished"
        );
    }
}

/// Application entry point for the simulation binary.
///
/// # Errors
///
/// Returns an error if configuration loading, environment setup, or the
/// simulation itself fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("courtship-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        width = config.world.width,
        height = config.world.height,
        rule = %config.model.rule,
        dating = %config.model.dating,
        max_rounds = config.world.max_rounds,
        "Configuration loaded"
    );

    // 3. Create the environment with a seeded RNG.
    let rng = SmallRng::seed_from_u64(config.world.seed);
    let mut env = Environment::new(
        config.model,
        config.world.width,
        config.world.height,
        rng,
        MemoryRecorder::new(),
        NoOpPortrayal,
    )
    .map_err(EngineError::from)?;

    // 4. Seed the starting population.
    let seeded =
        spawner::seed_population(&mut env, config.world.initial_females, config.world.initial_males);
    info!(population = seeded.total(), "Seed population ready, entering round loop");

    // 5. Run the round loop.
    let result = runner::run_simulation(&mut env, config.world.max_rounds, &mut ProgressCallback)
        .map_err(EngineError::from)?;

    // 6. Report results.
    let recorder = env.recorder();
    info!(
        end_reason = ?result.end_reason,
        rounds_run = result.rounds_run,
        couples = recorder.len(),
        final_population = env.population(),
        "simulation finished"
    );
    match recorder.attractiveness_correlation() {
        Some(correlation) => info!(correlation, "partner attractiveness correlation"),
        None => info!("too few couples for a correlation estimate"),
    }

    write_report(recorder)?;
    info!(path = REPORT_PATH, "result report written");

    info!("courtship-engine shutdown complete");
    Ok(())
}

/// Load the simulation configuration from `courtship-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let config_path = Path::new("courtship-config.yaml");
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}

/// Write the recorded couples to the JSON report file.
fn write_report(recorder: &MemoryRecorder) -> Result<(), EngineError> {
    let json =
        serde_json::to_string_pretty(recorder.couples()).map_err(|e| EngineError::Report {
            message: format!("failed to serialize couples: {e}"),
        })?;
    std::fs::write(REPORT_PATH, json).map_err(|e| EngineError::Report {
        message: format!("failed to write {REPORT_PATH}: {e}"),
    })?;
    Ok(())
}
