//! Repeating-invocation schedule with cancellation tokens.
//!
//! Agents register once for repeated invocation and receive an opaque
//! [`ScheduleHandle`]; cancelling the handle deregisters them before
//! they can be invoked again. The tick cycle takes a snapshot of the
//! scheduled agents at round start, so agents removed mid-round are
//! protected from re-invocation by a liveness check rather than by
//! mutating the active iteration.

use std::collections::BTreeMap;

use courtship_types::{AgentId, ScheduleHandle};

/// A single-threaded repeating schedule.
///
/// Handles are issued from a monotonic counter, so a snapshot pass
/// visits agents in registration order. Callers must not rely on that
/// order; it is an implementation detail, not a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Next handle value to issue.
    next_handle: u64,
    /// Scheduled agents by handle.
    entries: BTreeMap<ScheduleHandle, AgentId>,
}

impl Schedule {
    /// Create an empty schedule.
    pub const fn new() -> Self {
        Self {
            next_handle: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Register an agent for repeated invocation.
    ///
    /// Returns the cancellation token that removes the registration.
    pub fn schedule_repeating(&mut self, agent: AgentId) -> ScheduleHandle {
        let handle = ScheduleHandle(self.next_handle);
        self.next_handle = self.next_handle.saturating_add(1);
        self.entries.insert(handle, agent);
        handle
    }

    /// Cancel a registration, returning the agent it belonged to.
    ///
    /// Returns `None` if the handle is not registered -- callers treat
    /// that as a population-accounting fault, since every agent is
    /// scheduled exactly once and cancelled at most once.
    pub fn cancel(&mut self, handle: ScheduleHandle) -> Option<AgentId> {
        self.entries.remove(&handle)
    }

    /// Whether a handle is currently registered.
    pub fn contains(&self, handle: ScheduleHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    /// Snapshot of the currently scheduled agents, in handle order.
    ///
    /// The snapshot is taken at round start so that removals during the
    /// round cannot disturb the iteration.
    pub fn pass(&self) -> Vec<AgentId> {
        self.entries.values().copied().collect()
    }

    /// Number of scheduled agents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no agents are scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
