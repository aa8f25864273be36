//! The simulation environment: population, pools, grid, and schedule.
//!
//! The environment owns every piece of mutable simulation state and is
//! the only place agents are created, removed, or moved. All population
//! bookkeeping is kept in lockstep: an agent in the agent map is always
//! scheduled, always in exactly one round pool, and (in spatial mode)
//! always placed on the grid. Any disagreement between those structures
//! is a [`EnvironmentError::PopulationCorrupted`] fault and aborts the
//! run rather than silently skewing the experiment.

use std::collections::{BTreeMap, BTreeSet};

use courtship_agents::agent::replacement_agent;
use courtship_agents::{ModelParams, ParamsError};
use courtship_types::{Agent, AgentId, DatingMode, Gender};
use courtship_world::{MovementSettings, SparseGrid, WorldError, movement};
use rand::Rng;

use crate::clock::{ClockError, RoundClock};
use crate::portrayal::{Portrayal, attractiveness_opacity, gender_color};
use crate::recorder::CoupleRecorder;
use crate::schedule::Schedule;

/// Errors that can occur during environment operations.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// The model parameters failed validation.
    #[error("invalid model parameters: {source}")]
    Params {
        /// The underlying parameter validation error.
        #[from]
        source: ParamsError,
    },

    /// A grid operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying grid error.
        #[from]
        source: WorldError,
    },

    /// An operation referenced an agent that is not in the population.
    #[error("unknown agent: {0}")]
    UnknownAgent(AgentId),

    /// The population bookkeeping structures disagree about an agent.
    ///
    /// This is a fatal accounting fault: the schedule, round pools,
    /// grid, and agent map must always agree.
    #[error("population accounting corrupted for agent {agent_id}: {context}")]
    PopulationCorrupted {
        /// The agent whose bookkeeping is inconsistent.
        agent_id: AgentId,
        /// Which structure disagreed.
        context: String,
    },
}

/// The per-gender round pools.
///
/// `current` holds agents still eligible to date this round; agents that
/// dated (or were deferred by a failed date) move to `next` and become
/// eligible again when the round advances.
#[derive(Debug, Clone, Default)]
pub(crate) struct GenderPools {
    /// Eligible female agents.
    female: BTreeSet<AgentId>,
    /// Eligible male agents.
    male: BTreeSet<AgentId>,
}

impl GenderPools {
    pub(crate) const fn pool(&self, gender: Gender) -> &BTreeSet<AgentId> {
        match gender {
            Gender::Female => &self.female,
            Gender::Male => &self.male,
        }
    }

    pub(crate) const fn pool_mut(&mut self, gender: Gender) -> &mut BTreeSet<AgentId> {
        match gender {
            Gender::Female => &mut self.female,
            Gender::Male => &mut self.male,
        }
    }

    fn absorb(&mut self, other: Self) {
        self.female.extend(other.female);
        self.male.extend(other.male);
    }
}

/// The simulation environment.
///
/// Generic over the random source, couple recorder, and portrayal so
/// tests can run with a seeded RNG and stub collaborators.
#[derive(Debug)]
pub struct Environment<R, C, P> {
    /// Validated model parameters.
    pub(crate) params: ModelParams,
    /// Movement tunables derived from the parameters.
    pub(crate) movement: MovementSettings,
    /// Spatial index; `Some` exactly when dating mode is spatial.
    pub(crate) grid: Option<SparseGrid>,
    /// Grid width in cells.
    pub(crate) width: i32,
    /// Grid height in cells.
    pub(crate) height: i32,
    /// Every live agent, by ID.
    pub(crate) agents: BTreeMap<AgentId, Agent>,
    /// Agents eligible to date this round.
    pub(crate) current: GenderPools,
    /// Agents deferred to the next round.
    pub(crate) next: GenderPools,
    /// Repeating invocation schedule.
    pub(crate) schedule: Schedule,
    /// Round clock.
    pub(crate) clock: RoundClock,
    /// Random source for every stochastic draw.
    pub(crate) rng: R,
    /// Sink for successful couplings.
    pub(crate) recorder: C,
    /// Sink for agent visuals.
    pub(crate) portrayal: P,
}

impl<R, C, P> Environment<R, C, P>
where
    R: Rng,
    C: CoupleRecorder,
    P: Portrayal,
{
    /// Create an empty environment.
    ///
    /// Allocates the grid only in spatial dating mode; in global mode
    /// positions are carried but never indexed.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::Params`] if the parameters are
    /// invalid, or [`EnvironmentError::World`] if the grid dimensions
    /// are degenerate.
    pub fn new(
        params: ModelParams,
        width: i32,
        height: i32,
        rng: R,
        recorder: C,
        portrayal: P,
    ) -> Result<Self, EnvironmentError> {
        params.validate()?;
        let grid = match params.dating {
            DatingMode::Spatial => Some(SparseGrid::new(width, height)?),
            DatingMode::Global => None,
        };
        let movement = MovementSettings {
            activity_rate: params.activity_rate,
            direction_change_rate: params.direction_change_rate,
            aggregation_radius: params.aggregation_radius,
            one_agent_per_cell: params.one_agent_per_cell,
        };
        Ok(Self {
            params,
            movement,
            grid,
            width,
            height,
            agents: BTreeMap::new(),
            current: GenderPools::default(),
            next: GenderPools::default(),
            schedule: Schedule::new(),
            clock: RoundClock::new(),
            rng,
            recorder,
            portrayal,
        })
    }

    /// Register an agent with every bookkeeping structure.
    ///
    /// The agent is scheduled for repeated invocation, placed on the
    /// grid (spatial mode), added to the current round pool, and handed
    /// to the portrayal. Returns the agent's ID.
    pub fn insert_agent(&mut self, mut agent: Agent) -> AgentId {
        let handle = self.schedule.schedule_repeating(agent.id);
        agent.schedule_handle = Some(handle);
        if let Some(grid) = self.grid.as_mut() {
            agent.position = grid.place(agent.id, agent.position);
        }
        let color = gender_color(agent.gender);
        let opacity = attractiveness_opacity(&agent, &self.params);
        self.portrayal.portray(&agent, color, opacity);
        self.current.pool_mut(agent.gender).insert(agent.id);
        let id = agent.id;
        self.agents.insert(id, agent);
        id
    }

    /// Create and register a replacement agent of the given gender.
    ///
    /// Used after a successful coupling so the population size and
    /// gender ratio stay constant. The replacement gets a fresh random
    /// attractiveness and position and enters the current round pool.
    pub fn replicate(&mut self, gender: Gender) -> AgentId {
        let agent =
            replacement_agent(gender, &self.params, self.width, self.height, &mut self.rng);
        self.insert_agent(agent)
    }

    /// Remove an agent from every bookkeeping structure.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::UnknownAgent`] if the agent is not in
    /// the population, or [`EnvironmentError::PopulationCorrupted`] if
    /// any other structure disagrees with the agent map.
    pub fn remove_agent(&mut self, id: AgentId) -> Result<Agent, EnvironmentError> {
        let agent = self.agents.remove(&id).ok_or(EnvironmentError::UnknownAgent(id))?;

        let Some(handle) = agent.schedule_handle else {
            return Err(EnvironmentError::PopulationCorrupted {
                agent_id: id,
                context: "agent has no schedule handle".to_owned(),
            });
        };
        if self.schedule.cancel(handle).is_none() {
            return Err(EnvironmentError::PopulationCorrupted {
                agent_id: id,
                context: "schedule handle already cancelled".to_owned(),
            });
        }

        let in_current = self.current.pool_mut(agent.gender).remove(&id);
        let in_next = self.next.pool_mut(agent.gender).remove(&id);
        if !in_current && !in_next {
            return Err(EnvironmentError::PopulationCorrupted {
                agent_id: id,
                context: "agent was in neither round pool".to_owned(),
            });
        }

        if let Some(grid) = self.grid.as_mut() {
            grid.remove(id)?;
        }
        Ok(agent)
    }

    /// Defer an agent to the next round after a failed date.
    ///
    /// Marks the agent as dated and moves it from the current pool to
    /// the next pool, so it cannot be sampled again this round.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::UnknownAgent`] if the agent is not in
    /// the population, or [`EnvironmentError::PopulationCorrupted`] if
    /// it was not in the current pool.
    pub fn defer_to_next_round(&mut self, id: AgentId) -> Result<(), EnvironmentError> {
        let agent = self.agents.get_mut(&id).ok_or(EnvironmentError::UnknownAgent(id))?;
        agent.dated_this_round = true;
        let gender = agent.gender;
        if !self.current.pool_mut(gender).remove(&id) {
            return Err(EnvironmentError::PopulationCorrupted {
                agent_id: id,
                context: "deferred agent was not in the current pool".to_owned(),
            });
        }
        self.next.pool_mut(gender).insert(id);
        Ok(())
    }

    /// Reset round-scoped agent state at the start of a round.
    pub fn begin_round(&mut self) {
        for agent in self.agents.values_mut() {
            agent.dated_this_round = false;
        }
    }

    /// Hand the round pools over at the end of a round.
    ///
    /// Agents still in the current pool never found a partner; they are
    /// carried into the next round together with the deferred agents.
    /// After the call the next pool is empty.
    pub fn advance_round(&mut self) {
        let leftover = core::mem::take(&mut self.current);
        self.next.absorb(leftover);
        core::mem::swap(&mut self.current, &mut self.next);
    }

    /// Draw a uniform random agent from the current pool of a gender.
    ///
    /// Returns `None` when the pool is empty.
    pub fn sample_from_pool(&mut self, gender: Gender) -> Option<AgentId> {
        let pool = self.current.pool(gender);
        if pool.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..pool.len());
        self.current.pool(gender).iter().nth(index).copied()
    }

    /// Move an agent for this tick (spatial mode only; no-op otherwise).
    ///
    /// With probability `aggregation_rate` the agent aggregates toward
    /// its neighbors; otherwise it wanders.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::UnknownAgent`] if the agent is not in
    /// the population.
    pub fn move_agent(&mut self, id: AgentId) -> Result<(), EnvironmentError> {
        let Some(grid) = self.grid.as_mut() else {
            return Ok(());
        };
        let mut agent =
            self.agents.get(&id).copied().ok_or(EnvironmentError::UnknownAgent(id))?;
        if self.rng.random_bool(self.params.aggregation_rate) {
            movement::aggregate(&mut agent, grid, &self.movement, &mut self.rng);
        } else {
            movement::wander(&mut agent, grid, &self.movement, &mut self.rng);
        }
        self.agents.insert(id, agent);
        Ok(())
    }

    /// Advance the round clock, returning the new round number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::RoundOverflow`] if the round counter would
    /// overflow.
    pub const fn advance_clock(&mut self) -> Result<u64, ClockError> {
        self.clock.advance()
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// Look up a live agent by ID.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Whether an agent is still in the population.
    pub fn is_live(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// Number of live agents.
    pub fn population(&self) -> usize {
        self.agents.len()
    }

    /// Number of agents of a gender still eligible this round.
    pub fn current_count(&self, gender: Gender) -> usize {
        self.current.pool(gender).len()
    }

    /// Number of agents of a gender deferred to the next round.
    pub fn next_count(&self, gender: Gender) -> usize {
        self.next.pool(gender).len()
    }

    /// Current round number.
    pub const fn round(&self) -> u64 {
        self.clock.round()
    }

    /// Snapshot of the scheduled agents, in registration order.
    pub fn scheduled_pass(&self) -> Vec<AgentId> {
        self.schedule.pass()
    }

    /// The couple recorder.
    pub const fn recorder(&self) -> &C {
        &self.recorder
    }

    /// The model parameters.
    pub const fn params(&self) -> &ModelParams {
        &self.params
    }

    /// The spatial grid, if the environment runs in spatial mode.
    pub const fn grid(&self) -> Option<&SparseGrid> {
        self.grid.as_ref()
    }
}
