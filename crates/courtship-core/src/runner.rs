//! Bounded experiment runner.
//!
//! Drives the environment round by round until the configured round
//! limit is reached or one gender's pool empties (a dating market with
//! a missing side can never form another couple). A [`TickCallback`]
//! observes each completed round; the engine uses it for progress
//! logging and tests use it to capture summaries.

use courtship_types::Gender;
use rand::Rng;
use tracing::info;

use crate::environment::Environment;
use crate::portrayal::Portrayal;
use crate::recorder::CoupleRecorder;
use crate::tick::{TickError, TickSummary, run_tick};

/// Errors that can occur while running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick failed.
    #[error("tick failed: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Why a simulation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The configured round limit was reached.
    MaxRounds,
    /// One gender's pool emptied, so no further couple can form.
    PopulationCollapse,
}

/// The result of a completed simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationResult {
    /// Why the run ended.
    pub end_reason: EndReason,
    /// Number of rounds actually executed.
    pub rounds_run: u64,
    /// Summary of the last executed round, if any round ran.
    pub final_summary: Option<TickSummary>,
}

/// Observer invoked after every completed round.
pub trait TickCallback {
    /// Receive the summary of a completed round.
    fn on_tick(&mut self, summary: &TickSummary);
}

/// A callback that ignores every round.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary) {}
}

/// Run the simulation for at most `max_rounds` rounds.
///
/// The collapse check runs before each tick: if either gender's current
/// pool is empty, the run ends immediately with
/// [`EndReason::PopulationCollapse`]. A seed population with zero agents
/// of one gender therefore ends before its first round.
///
/// # Errors
///
/// Returns [`RunnerError::Tick`] if any round fails.
pub fn run_simulation<R, C, P, T>(
    env: &mut Environment<R, C, P>,
    max_rounds: u64,
    callback: &mut T,
) -> Result<SimulationResult, RunnerError>
where
    R: Rng,
    C: CoupleRecorder,
    P: Portrayal,
    T: TickCallback,
{
    let mut rounds_run: u64 = 0;
    let mut final_summary: Option<TickSummary> = None;

    while rounds_run < max_rounds {
        if env.current_count(Gender::Female) == 0 || env.current_count(Gender::Male) == 0 {
            info!(
                rounds_run,
                females = env.current_count(Gender::Female),
                males = env.current_count(Gender::Male),
                "population collapsed, ending run"
            );
            return Ok(SimulationResult {
                end_reason: EndReason::PopulationCollapse,
                rounds_run,
                final_summary,
            });
        }
        let summary = run_tick(env)?;
        callback.on_tick(&summary);
        rounds_run = rounds_run.saturating_add(1);
        final_summary = Some(summary);
    }

    info!(rounds_run, "round limit reached, ending run");
    Ok(SimulationResult {
        end_reason: EndReason::MaxRounds,
        rounds_run,
        final_summary,
    })
}

#[cfg(test)]
mod tests {
    use courtship_agents::ModelParams;
    use courtship_types::{Agent, Position};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::environment::EnvironmentError;
    use crate::portrayal::NoOpPortrayal;
    use crate::recorder::MemoryRecorder;

    type TestEnvironment = Environment<SmallRng, MemoryRecorder, NoOpPortrayal>;

    /// Captures every round summary for inspection.
    #[derive(Debug, Default)]
    struct CapturingCallback {
        summaries: Vec<TickSummary>,
    }

    impl TickCallback for CapturingCallback {
        fn on_tick(&mut self, summary: &TickSummary) {
            self.summaries.push(*summary);
        }
    }

    fn make_env(seed: u64) -> Result<TestEnvironment, EnvironmentError> {
        Environment::new(
            ModelParams::default(),
            10,
            10,
            SmallRng::seed_from_u64(seed),
            MemoryRecorder::new(),
            NoOpPortrayal,
        )
    }

    fn seed_pair(env: &mut TestEnvironment, attractiveness: f64) {
        env.insert_agent(Agent::new(Gender::Female, attractiveness, Position::default()));
        env.insert_agent(Agent::new(Gender::Male, attractiveness, Position::default()));
    }

    #[test]
    fn empty_population_collapses_before_the_first_round() -> Result<(), Box<dyn std::error::Error>> {
        let mut env = make_env(1)?;
        let result = run_simulation(&mut env, 100, &mut NoOpCallback)?;
        assert_eq!(result.end_reason, EndReason::PopulationCollapse);
        assert_eq!(result.rounds_run, 0);
        assert!(result.final_summary.is_none());
        Ok(())
    }

    #[test]
    fn single_gender_population_collapses() -> Result<(), Box<dyn std::error::Error>> {
        let mut env = make_env(2)?;
        env.insert_agent(Agent::new(Gender::Female, 5.0, Position::default()));
        let result = run_simulation(&mut env, 100, &mut NoOpCallback)?;
        assert_eq!(result.end_reason, EndReason::PopulationCollapse);
        assert_eq!(result.rounds_run, 0);
        Ok(())
    }

    #[test]
    fn balanced_population_runs_to_the_round_limit() -> Result<(), Box<dyn std::error::Error>> {
        let mut env = make_env(3)?;
        seed_pair(&mut env, 5.0);
        seed_pair(&mut env, 8.0);

        let mut callback = CapturingCallback::default();
        let result = run_simulation(&mut env, 25, &mut callback)?;

        assert_eq!(result.end_reason, EndReason::MaxRounds);
        assert_eq!(result.rounds_run, 25);
        assert_eq!(callback.summaries.len(), 25);
        assert_eq!(result.final_summary, callback.summaries.last().copied());
        // Replication keeps the population constant across the run.
        assert!(callback.summaries.iter().all(|summary| summary.population == 4));
        Ok(())
    }
}
