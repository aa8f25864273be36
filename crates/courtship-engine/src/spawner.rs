//! Seed population spawner.
//!
//! At simulation start the spawner fills the environment with the
//! configured number of agents per gender. Every seed agent gets a
//! fresh integer attractiveness and a uniform random grid position,
//! exactly like the replacements created after a coupling, so the
//! population is statistically homogeneous across the whole run.

use courtship_core::environment::Environment;
use courtship_core::portrayal::Portrayal;
use courtship_core::recorder::CoupleRecorder;
use courtship_types::{AgentId, Gender};
use rand::Rng;
use tracing::info;

/// The output of the spawner: IDs of all seed agents, per gender.
#[derive(Debug, Clone, Default)]
pub struct SeedResult {
    /// IDs of the seeded female agents.
    pub females: Vec<AgentId>,
    /// IDs of the seeded male agents.
    pub males: Vec<AgentId>,
}

impl SeedResult {
    /// Total number of seeded agents.
    pub fn total(&self) -> usize {
        self.females.len().saturating_add(self.males.len())
    }
}

/// Seed the environment with the configured starting population.
pub fn seed_population<R, C, P>(
    env: &mut Environment<R, C, P>,
    initial_females: u32,
    initial_males: u32,
) -> SeedResult
where
    R: Rng,
    C: CoupleRecorder,
    P: Portrayal,
{
    let mut result = SeedResult::default();
    for _ in 0..initial_females {
        result.females.push(env.replicate(Gender::Female));
    }
    for _ in 0..initial_males {
        result.males.push(env.replicate(Gender::Male));
    }
    info!(
        females = result.females.len(),
        males = result.males.len(),
        "seed population created"
    );
    result
}

#[cfg(test)]
mod tests {
    use courtship_agents::ModelParams;
    use courtship_core::environment::EnvironmentError;
    use courtship_core::portrayal::NoOpPortrayal;
    use courtship_core::recorder::NoOpRecorder;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn seeds_the_requested_gender_split() -> Result<(), EnvironmentError> {
        let mut env = Environment::new(
            ModelParams::default(),
            50,
            50,
            SmallRng::seed_from_u64(42),
            NoOpRecorder,
            NoOpPortrayal,
        )?;

        let result = seed_population(&mut env, 30, 20);
        assert_eq!(result.females.len(), 30);
        assert_eq!(result.males.len(), 20);
        assert_eq!(result.total(), 50);
        assert_eq!(env.population(), 50);
        assert_eq!(env.current_count(Gender::Female), 30);
        assert_eq!(env.current_count(Gender::Male), 20);
        Ok(())
    }

    #[test]
    fn seed_attractiveness_stays_in_bounds() -> Result<(), EnvironmentError> {
        let params = ModelParams::default();
        let top = params.max_attractiveness_f64();
        let mut env = Environment::new(
            params,
            50,
            50,
            SmallRng::seed_from_u64(7),
            NoOpRecorder,
            NoOpPortrayal,
        )?;

        let result = seed_population(&mut env, 40, 40);
        for id in result.females.iter().chain(result.males.iter()) {
            let Some(agent) = env.agent(*id) else {
                return Err(EnvironmentError::UnknownAgent(*id));
            };
            assert!((1.0..=top).contains(&agent.attractiveness));
        }
        Ok(())
    }
}
