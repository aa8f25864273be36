//! Toroidal grid and movement model for the Courtship simulation.
//!
//! This crate models the physical world of the spatial variant: a sparse
//! toroidal grid of agents and the per-tick movement behaviors that
//! reposition them. It knows nothing about dating -- the core consults
//! the grid for neighborhoods and drives movement through the functions
//! here.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid operations.
//! - [`grid`] -- [`SparseGrid`]: placement, removal, cell queries, and
//!   toroidal Moore-neighborhood lookups.
//! - [`movement`] -- Wander and aggregate behaviors with optional
//!   one-agent-per-cell placement.

pub mod error;
pub mod grid;
pub mod movement;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use grid::SparseGrid;
pub use movement::MovementSettings;
