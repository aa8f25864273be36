//! The pairing protocol: partner search, mutual evaluation, turnover.
//!
//! One date per invoked agent per round. The seeker finds a candidate of
//! the opposite gender (uniformly from the global pool, or from its
//! Moore neighborhood in spatial mode), both sides draw an independent
//! acceptance decision from the configured rule, and the outcome either
//! dissolves the couple into two fresh replacements or defers both
//! agents to the next round. Date and frustration counters advance after
//! the outcome is applied, so coupled agents leave with their counters
//! untouched.

use courtship_agents::rules::dating_probability;
use courtship_types::{Agent, AgentId, DatingMode, Gender};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::environment::{Environment, EnvironmentError};
use crate::portrayal::Portrayal;
use crate::recorder::CoupleRecorder;

/// The outcome of one date attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOutcome {
    /// No eligible partner was available; the seeker stays in the
    /// current pool and keeps its counters.
    NoPartner,
    /// Both sides accepted; the couple left the population and two
    /// replacements were created.
    Coupled {
        /// The departed female partner.
        female: AgentId,
        /// The departed male partner.
        male: AgentId,
    },
    /// At least one side declined; both agents were deferred to the
    /// next round.
    Deferred,
}

impl<R, C, P> Environment<R, C, P>
where
    R: Rng,
    C: CoupleRecorder,
    P: Portrayal,
{
    /// Run one date attempt for the given seeker.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::UnknownAgent`] if the seeker is not
    /// in the population, or a propagated bookkeeping error if the
    /// population structures disagree mid-date.
    pub fn date(&mut self, seeker_id: AgentId) -> Result<DateOutcome, EnvironmentError> {
        let seeker =
            self.agents.get(&seeker_id).copied().ok_or(EnvironmentError::UnknownAgent(seeker_id))?;

        let partner_id = match self.params.dating {
            DatingMode::Global => self.find_global_partner(seeker.gender),
            DatingMode::Spatial => self.find_local_partner(&seeker),
        };
        let Some(partner_id) = partner_id else {
            debug!(seeker = %seeker_id, "no eligible partner this round");
            return Ok(DateOutcome::NoPartner);
        };

        self.evaluate_couple(seeker_id, partner_id)
    }

    /// Pick a uniform random partner from the opposite gender's current
    /// pool. The pool never contains the seeker or any dated agent.
    fn find_global_partner(&mut self, seeker_gender: Gender) -> Option<AgentId> {
        self.sample_from_pool(seeker_gender.opposite())
    }

    /// Pick a partner from the seeker's Moore neighborhood.
    ///
    /// Candidates are visited in random order; the first opposite-gender
    /// neighbor that has not yet dated this round is chosen.
    fn find_local_partner(&mut self, seeker: &Agent) -> Option<AgentId> {
        let grid = self.grid.as_ref()?;
        let mut neighbors = grid.moore_neighbors(seeker.position, self.params.date_search_radius);
        neighbors.shuffle(&mut self.rng);
        neighbors.into_iter().map(|(id, _)| id).find(|id| {
            *id != seeker.id
                && self.agents.get(id).is_some_and(|candidate| {
                    candidate.gender == seeker.gender.opposite() && !candidate.dated_this_round
                })
        })
    }

    /// Evaluate a candidate couple and apply the outcome.
    ///
    /// Each side accepts independently with its own dating probability;
    /// the second draw is skipped when the first side declines. On
    /// mutual acceptance the couple is recorded (female first), both
    /// agents leave the population, and one replacement per gender is
    /// created. Otherwise both agents are deferred to the next round.
    /// Counters advance afterwards, so only deferred agents accumulate
    /// dates and frustration.
    fn evaluate_couple(
        &mut self,
        seeker_id: AgentId,
        partner_id: AgentId,
    ) -> Result<DateOutcome, EnvironmentError> {
        if seeker_id == partner_id {
            return Err(EnvironmentError::PopulationCorrupted {
                agent_id: seeker_id,
                context: "agent was paired with itself".to_owned(),
            });
        }
        let seeker =
            self.agents.get(&seeker_id).copied().ok_or(EnvironmentError::UnknownAgent(seeker_id))?;
        let partner = self
            .agents
            .get(&partner_id)
            .copied()
            .ok_or(EnvironmentError::UnknownAgent(partner_id))?;

        let rule = self.params.rule;
        let seeker_accepts = dating_probability(rule, &seeker, &partner, &self.params);
        let partner_accepts = dating_probability(rule, &partner, &seeker, &self.params);
        let matched =
            self.rng.random_bool(seeker_accepts) && self.rng.random_bool(partner_accepts);

        let outcome = if matched {
            let (female, male) = if seeker.gender == Gender::Female {
                (seeker, partner)
            } else {
                (partner, seeker)
            };
            self.recorder.record_couple(self.clock.round(), &female, &male);
            debug!(
                round = self.clock.round(),
                female = %female.id,
                male = %male.id,
                female_attractiveness = female.attractiveness,
                male_attractiveness = male.attractiveness,
                "couple formed"
            );
            self.remove_agent(seeker_id)?;
            self.remove_agent(partner_id)?;
            self.replicate(Gender::Female);
            self.replicate(Gender::Male);
            DateOutcome::Coupled { female: female.id, male: male.id }
        } else {
            self.defer_to_next_round(seeker_id)?;
            self.defer_to_next_round(partner_id)?;
            DateOutcome::Deferred
        };

        self.bump_counters(seeker_id);
        self.bump_counters(partner_id);
        Ok(outcome)
    }

    /// Advance an agent's date and frustration counters, both capped at
    /// their configured maxima. Silently skips agents that already left
    /// the population (a coupled pair is removed before counters move).
    fn bump_counters(&mut self, id: AgentId) {
        let max_dates = self.params.max_dates;
        let max_frustration = self.params.max_frustration;
        if let Some(agent) = self.agents.get_mut(&id) {
            agent.dates = agent.dates.saturating_add(1).min(max_dates);
            agent.frustration = agent.frustration.saturating_add(1).min(max_frustration);
        }
    }
}
