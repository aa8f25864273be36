//! Core entity structs for the mate-choice simulation.
//!
//! The only entity in the model is the [`Agent`]: a dater with a fixed
//! gender and attractiveness, per-round dating state, and (in spatial
//! mode) a grid position and movement heading.

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, ScheduleHandle};
use crate::Gender;

/// Frustration level assigned to every newly created agent.
pub const INITIAL_FRUSTRATION: u32 = 1;

/// Integer grid coordinates of an agent.
///
/// Meaningful only when the simulation runs in spatial mode; in global
/// dating mode the position is an inert placeholder. Coordinates are
/// always stored wrapped into grid bounds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    /// Column coordinate.
    pub x: i32,
    /// Row coordinate.
    pub y: i32,
}

impl Position {
    /// Create a position from raw coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Current movement heading of an agent.
///
/// Each component is in `{-1, 0, 1}`; the `(0, 0)` heading means the
/// agent stays in its cell when placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    /// Horizontal step per placement.
    pub dx: i32,
    /// Vertical step per placement.
    pub dy: i32,
}

impl Heading {
    /// Create a heading from raw components.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// A dating agent: the aggregate root of the Kalick–Hamilton model.
///
/// Gender and attractiveness are fixed for the agent's lifetime. The
/// date and frustration counters evolve as the agent dates and are
/// capped by the configured maxima. `dated_this_round` is reset by the
/// environment at round start, never by the agent itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier.
    pub id: AgentId,
    /// Gender, fixed at creation.
    pub gender: Gender,
    /// Attractiveness score, fixed at creation, in `[1, max_attractiveness]`.
    pub attractiveness: f64,
    /// Grid position (spatial mode only).
    pub position: Position,
    /// Movement heading (spatial mode only).
    pub heading: Heading,
    /// Consecutive-failure counter, starts at [`INITIAL_FRUSTRATION`] and
    /// increases by one per failed round, capped at the configured maximum.
    pub frustration: u32,
    /// Number of dating attempts this life, capped at the configured maximum.
    pub dates: u32,
    /// Whether the agent has already paired or been deferred this round.
    pub dated_this_round: bool,
    /// Cancellation token for the agent's repeating schedule entry, set
    /// when the agent is registered with the schedule.
    pub schedule_handle: Option<ScheduleHandle>,
}

impl Agent {
    /// Create a fresh agent with a newly allocated ID and zeroed counters.
    ///
    /// The agent starts undated with `dates = 0` and
    /// `frustration = INITIAL_FRUSTRATION`, and is not yet scheduled.
    pub fn new(gender: Gender, attractiveness: f64, position: Position) -> Self {
        Self {
            id: AgentId::new(),
            gender,
            attractiveness,
            position,
            heading: Heading::new(0, 0),
            frustration: INITIAL_FRUSTRATION,
            dates: 0,
            dated_this_round: false,
            schedule_handle: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_agent_starts_undated() {
        let agent = Agent::new(Gender::Female, 7.0, Position::new(3, 4));
        assert_eq!(agent.dates, 0);
        assert_eq!(agent.frustration, INITIAL_FRUSTRATION);
        assert!(!agent.dated_this_round);
        assert!(agent.schedule_handle.is_none());
        assert_eq!(agent.heading, Heading::new(0, 0));
    }

    #[test]
    fn agents_receive_distinct_ids() {
        let a = Agent::new(Gender::Male, 1.0, Position::default());
        let b = Agent::new(Gender::Male, 1.0, Position::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn position_display_is_coordinate_pair() {
        assert_eq!(Position::new(-1, 9).to_string(), "(-1, 9)");
    }
}
