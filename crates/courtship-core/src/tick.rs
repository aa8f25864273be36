//! The round cycle: one schedule pass over the live population.
//!
//! A tick advances the clock, resets round-scoped state, and invokes
//! every agent that was scheduled at round start. Each invoked agent
//! moves (spatial mode) and attempts one date unless it already dated
//! as someone else's partner. The pass iterates over a snapshot, so
//! agents removed mid-round are skipped by a liveness check instead of
//! mutating the iteration.

use courtship_types::Gender;
use rand::Rng;
use tracing::debug;

use crate::clock::ClockError;
use crate::environment::{Environment, EnvironmentError};
use crate::pairing::DateOutcome;
use crate::portrayal::Portrayal;
use crate::recorder::CoupleRecorder;

/// Errors that can occur while running a tick.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The round clock failed to advance.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// An environment operation failed mid-round.
    #[error("environment error: {source}")]
    Environment {
        /// The underlying environment error.
        #[from]
        source: EnvironmentError,
    },
}

/// Aggregated counts for one completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// The round these counts belong to.
    pub round: u64,
    /// Couples formed this round.
    pub couples: u64,
    /// Date attempts where at least one side declined.
    pub deferrals: u64,
    /// Invocations that found no eligible partner.
    pub no_partner: u64,
    /// Live female agents after the round.
    pub females: u64,
    /// Live male agents after the round.
    pub males: u64,
    /// Total live agents after the round.
    pub population: u64,
}

/// Run one full round.
///
/// # Errors
///
/// Returns [`TickError::Clock`] if the round counter would overflow, or
/// [`TickError::Environment`] if population bookkeeping fails mid-round.
pub fn run_tick<R, C, P>(env: &mut Environment<R, C, P>) -> Result<TickSummary, TickError>
where
    R: Rng,
    C: CoupleRecorder,
    P: Portrayal,
{
    let round = env.advance_clock()?;
    env.begin_round();

    let mut couples: u64 = 0;
    let mut deferrals: u64 = 0;
    let mut no_partner: u64 = 0;

    for id in env.scheduled_pass() {
        // Removed as half of an earlier couple this round.
        if !env.is_live(id) {
            continue;
        }
        env.move_agent(id)?;
        // Already dated this round as someone else's partner.
        if env.agent(id).is_some_and(|agent| agent.dated_this_round) {
            continue;
        }
        match env.date(id)? {
            DateOutcome::Coupled { .. } => couples = couples.saturating_add(1),
            DateOutcome::Deferred => deferrals = deferrals.saturating_add(1),
            DateOutcome::NoPartner => no_partner = no_partner.saturating_add(1),
        }
    }

    env.advance_round();

    let females = u64::try_from(env.current_count(Gender::Female)).unwrap_or(u64::MAX);
    let males = u64::try_from(env.current_count(Gender::Male)).unwrap_or(u64::MAX);
    let summary = TickSummary {
        round,
        couples,
        deferrals,
        no_partner,
        females,
        males,
        population: u64::try_from(env.population()).unwrap_or(u64::MAX),
    };
    debug!(
        round,
        couples, deferrals, no_partner, females, males, "round complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use courtship_agents::ModelParams;
    use courtship_types::{Agent, DatingMode, Position};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::portrayal::NoOpPortrayal;
    use crate::recorder::MemoryRecorder;

    type TestEnvironment = Environment<SmallRng, MemoryRecorder, NoOpPortrayal>;

    fn make_env(params: ModelParams, seed: u64) -> Result<TestEnvironment, EnvironmentError> {
        Environment::new(params, 10, 10, SmallRng::seed_from_u64(seed), MemoryRecorder::new(), NoOpPortrayal)
    }

    #[test]
    fn empty_population_completes_a_round() -> Result<(), TickError> {
        let mut env = make_env(ModelParams::default(), 1)?;
        let summary = run_tick(&mut env)?;
        assert_eq!(summary.round, 1);
        assert_eq!(summary.population, 0);
        assert_eq!(summary.couples, 0);
        Ok(())
    }

    #[test]
    fn perfect_pair_couples_and_population_holds() -> Result<(), TickError> {
        let params = ModelParams::default();
        let top = params.max_attractiveness_f64();
        let mut env = make_env(params, 3)?;
        env.insert_agent(Agent::new(Gender::Female, top, Position::default()));
        env.insert_agent(Agent::new(Gender::Male, top, Position::default()));

        let summary = run_tick(&mut env)?;
        assert_eq!(summary.couples, 1);
        assert_eq!(summary.population, 2, "replacements keep the population constant");
        assert_eq!(summary.females, 1);
        assert_eq!(summary.males, 1);
        assert_eq!(env.recorder().len(), 1);
        Ok(())
    }

    #[test]
    fn every_agent_dates_at_most_once_per_round() -> Result<(), TickError> {
        // Low attractiveness keeps acceptance unlikely, so most rounds
        // end in deferrals; each attempt involves two agents.
        let mut env = make_env(ModelParams::default(), 11)?;
        for _ in 0..4 {
            env.insert_agent(Agent::new(Gender::Female, 1.0, Position::default()));
            env.insert_agent(Agent::new(Gender::Male, 1.0, Position::default()));
        }

        let summary = run_tick(&mut env)?;
        let attempts = summary
            .couples
            .saturating_add(summary.deferrals)
            .saturating_mul(2)
            .saturating_add(summary.no_partner);
        assert!(attempts <= 8, "eight agents allow at most eight date participations");
        Ok(())
    }

    #[test]
    fn spatial_round_moves_and_dates() -> Result<(), TickError> {
        let params = ModelParams {
            dating: DatingMode::Spatial,
            date_search_radius: 10,
            direction_change_rate: 1.0,
            ..ModelParams::default()
        };
        let top = params.max_attractiveness_f64();
        let mut env = make_env(params, 7)?;
        env.insert_agent(Agent::new(Gender::Female, top, Position::new(2, 2)));
        env.insert_agent(Agent::new(Gender::Male, top, Position::new(3, 3)));

        let summary = run_tick(&mut env)?;
        // The radius covers the whole grid, so the pair always meets.
        assert_eq!(summary.couples, 1);
        assert_eq!(summary.population, 2);
        Ok(())
    }

    #[test]
    fn rounds_are_numbered_consecutively() -> Result<(), TickError> {
        let mut env = make_env(ModelParams::default(), 2)?;
        assert_eq!(run_tick(&mut env)?.round, 1);
        assert_eq!(run_tick(&mut env)?.round, 2);
        assert_eq!(run_tick(&mut env)?.round, 3);
        Ok(())
    }
}
