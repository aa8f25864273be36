//! Shared type definitions for the Courtship mate-choice simulation.
//!
//! This crate is the single source of truth for all types used across the
//! Courtship workspace: the agent record, its identifiers, and the small
//! enumerations that configure the model.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers ([`AgentId`], [`ScheduleHandle`])
//! - [`enums`] -- Enumeration types ([`Gender`], [`DecisionRule`], [`DatingMode`])
//! - [`structs`] -- The [`Agent`] entity and its grid geometry

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{DatingMode, DecisionRule, Gender};
pub use ids::{AgentId, ScheduleHandle};
pub use structs::{Agent, Heading, Position, INITIAL_FRUSTRATION};
