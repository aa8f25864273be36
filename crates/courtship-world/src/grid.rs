//! Toroidal sparse grid: the spatial index of the simulation.
//!
//! Agents occupy integer cells on a `width` x `height` torus. The grid
//! tracks which agents sit in which cell and supports the queries the
//! core needs: placement, removal, cell occupancy, and toroidal
//! Moore-neighborhood lookups. Multiple agents may share a cell; the
//! one-agent-per-cell policy is enforced by the movement model, not
//! here.
//!
//! All coordinates handed in are wrapped into bounds, so stored
//! positions are always canonical.

use std::collections::{BTreeMap, BTreeSet};

use courtship_types::{AgentId, Position};

use crate::error::WorldError;

/// A sparse toroidal grid of agents.
///
/// Maintains the cell-to-agents and agent-to-cell maps in lockstep;
/// every mutation goes through [`place`] or [`remove`] so the two maps
/// never disagree.
///
/// [`place`]: SparseGrid::place
/// [`remove`]: SparseGrid::remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseGrid {
    /// Grid width in cells.
    width: i32,
    /// Grid height in cells.
    height: i32,
    /// Occupants of each non-empty cell.
    cells: BTreeMap<Position, BTreeSet<AgentId>>,
    /// Canonical position of each placed agent.
    positions: BTreeMap<AgentId, Position>,
}

impl SparseGrid {
    /// Create an empty grid with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either dimension is
    /// less than 1.
    pub fn new(width: i32, height: i32) -> Result<Self, WorldError> {
        if width < 1 || height < 1 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: BTreeMap::new(),
            positions: BTreeMap::new(),
        })
    }

    /// Grid width in cells.
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Number of agents currently placed.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the grid holds no agents.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Wrap a position onto the torus: each axis is reduced modulo its
    /// dimension, so `x = width` maps to 0 and `x = -1` maps to
    /// `width - 1`.
    pub const fn wrap(&self, position: Position) -> Position {
        Position::new(
            position.x.rem_euclid(self.width),
            position.y.rem_euclid(self.height),
        )
    }

    /// Place an agent at a position (wrapped into bounds), relocating it
    /// if it is already on the grid. Returns the canonical position.
    pub fn place(&mut self, id: AgentId, position: Position) -> Position {
        let destination = self.wrap(position);
        if let Some(previous) = self.positions.insert(id, destination) {
            self.vacate(id, previous);
        }
        self.cells.entry(destination).or_default().insert(id);
        destination
    }

    /// Remove an agent from the grid, returning the cell it occupied.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotPlaced`] if the agent is not on the grid
    /// -- a contract violation the caller must treat as fatal.
    pub fn remove(&mut self, id: AgentId) -> Result<Position, WorldError> {
        let position = self.positions.remove(&id).ok_or(WorldError::NotPlaced(id))?;
        self.vacate(id, position);
        Ok(position)
    }

    /// The canonical position of an agent, if it is placed.
    pub fn position_of(&self, id: AgentId) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    /// The agents occupying a cell (position wrapped into bounds).
    pub fn occupants(&self, position: Position) -> Vec<AgentId> {
        self.cells
            .get(&self.wrap(position))
            .map(|cell| cell.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether a cell is occupied by any agent other than `id`.
    pub fn occupied_by_other(&self, position: Position, id: AgentId) -> bool {
        self.cells
            .get(&self.wrap(position))
            .is_some_and(|cell| cell.iter().any(|occupant| *occupant != id))
    }

    /// The toroidal Moore neighborhood of a position: every agent within
    /// Chebyshev distance `radius`, excluding occupants of the center
    /// cell itself.
    ///
    /// Each agent appears at most once even when the radius wraps all
    /// the way around a small grid. Returned positions are canonical.
    pub fn moore_neighbors(&self, center: Position, radius: u32) -> Vec<(AgentId, Position)> {
        let center = self.wrap(center);
        // A radius beyond the larger dimension already covers the whole
        // torus, so clamp before converting to a signed offset.
        let radius = i32::try_from(radius)
            .unwrap_or(i32::MAX)
            .min(self.width.max(self.height));

        let mut seen_cells = BTreeSet::new();
        let mut neighbors = Vec::new();
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                let cell = self.wrap(Position::new(
                    center.x.saturating_add(dx),
                    center.y.saturating_add(dy),
                ));
                if cell == center || !seen_cells.insert(cell) {
                    continue;
                }
                if let Some(occupants) = self.cells.get(&cell) {
                    neighbors.extend(occupants.iter().map(|id| (*id, cell)));
                }
            }
        }
        neighbors
    }

    /// Drop an agent from a cell's occupant set, pruning empty cells.
    fn vacate(&mut self, id: AgentId, position: Position) {
        if let Some(cell) = self.cells.get_mut(&position) {
            cell.remove(&id);
            if cell.is_empty() {
                self.cells.remove(&position);
            }
        }
    }
}
