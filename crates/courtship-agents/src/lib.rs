//! Dating rules, model parameters, and agent creation for the Courtship
//! mate-choice simulation.
//!
//! This crate is the decision layer of the Kalick–Hamilton model --
//! everything that computes acceptance probabilities from agent
//! attributes without touching population state or I/O. It sits between
//! `courtship-types` (which defines the data structures) and
//! `courtship-core` (which orchestrates pairing and population turnover).
//!
//! # Modules
//!
//! - [`agent`] -- Factory functions for seed and replacement agents
//! - [`config`] -- Model parameters with startup validation ([`ModelParams`])
//! - [`rules`] -- The dating-probability rule family (pure functions)

pub mod agent;
pub mod config;
pub mod rules;

// Re-export primary types at crate root for convenience.
pub use config::{ModelParams, ParamsError};
