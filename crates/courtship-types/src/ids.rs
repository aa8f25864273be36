//! Type-safe identifier wrappers.
//!
//! Every agent in the simulation has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. Agent IDs use
//! UUID v7 (time-ordered) so that creation order is recoverable from
//! the ID itself. Schedule handles are plain monotonic counters issued
//! by the schedule; they are opaque cancellation tokens, not entity IDs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an agent in the simulation.
    AgentId
}

/// Opaque cancellation token for a repeating schedule entry.
///
/// Returned by the schedule when an agent is registered for repeated
/// invocation, and presented back to cancel that registration when the
/// agent leaves the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScheduleHandle(pub u64);

impl ScheduleHandle {
    /// Return the inner counter value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ScheduleHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
