//! Error types for the `courtship-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use courtship_types::AgentId;

/// Errors that can occur during grid operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The grid was constructed with a non-positive dimension.
    #[error("invalid grid dimensions: {width} x {height} (both must be at least 1)")]
    InvalidDimensions {
        /// Requested grid width.
        width: i32,
        /// Requested grid height.
        height: i32,
    },

    /// The agent is not placed on the grid.
    ///
    /// Removing an agent that is not present is a programming-contract
    /// violation: each agent is placed exactly once and removed at most
    /// once, so this surfaces corrupted population accounting.
    #[error("agent {0} is not placed on the grid")]
    NotPlaced(AgentId),
}
