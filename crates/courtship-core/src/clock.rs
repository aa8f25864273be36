//! Round clock for the simulation.
//!
//! The clock is the single source of truth for the current round number.
//! One round corresponds to one full schedule pass in which every live
//! agent is invoked once. The clock only ever advances; round-scoped
//! state (dated flags, pool hand-off) is owned by the environment.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Round counter would overflow.
    #[error("round counter overflow: cannot advance beyond u64::MAX")]
    RoundOverflow,
}

/// Monotonic round counter.
///
/// Starts at round 0 (before any tick has run) and increments at the
/// start of each tick, so the first executed round is round 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundClock {
    /// Current round number.
    round: u64,
}

impl RoundClock {
    /// Create a clock at round 0.
    pub const fn new() -> Self {
        Self { round: 0 }
    }

    /// Advance the clock by one round. Returns the new round number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::RoundOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub const fn advance(&mut self) -> Result<u64, ClockError> {
        match self.round.checked_add(1) {
            Some(next) => {
                self.round = next;
                Ok(next)
            }
            None => Err(ClockError::RoundOverflow),
        }
    }

    /// Return the current round number.
    pub const fn round(&self) -> u64 {
        self.round
    }
}
