//! Per-tick movement and aggregation behavior (spatial mode only).
//!
//! Each tick an agent either wanders (random-walk with a sticky heading)
//! or aggregates (heads toward the majority of its neighbors on each
//! axis). Placement is toroidal and optionally enforces one agent per
//! cell: a blocked move leaves the agent where it is.

use courtship_types::{Agent, Heading, Position};
use rand::Rng;

use crate::grid::SparseGrid;

/// Movement tunables, extracted from the model parameters so this crate
/// does not depend on the decision layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementSettings {
    /// Probability that the agent skips movement entirely this tick.
    pub activity_rate: f64,
    /// Probability that a wandering agent re-randomizes its heading.
    pub direction_change_rate: f64,
    /// Moore-neighborhood radius inspected by [`aggregate`].
    pub aggregation_radius: u32,
    /// When true, moves into occupied cells are rejected.
    pub one_agent_per_cell: bool,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            activity_rate: 0.0,
            direction_change_rate: 0.5,
            aggregation_radius: 1,
            one_agent_per_cell: false,
        }
    }
}

/// Draw a uniform random heading with each component in `{-1, 0, 1}`,
/// including the stationary `(0, 0)` heading.
pub fn random_heading(rng: &mut impl Rng) -> Heading {
    Heading::new(rng.random_range(-1..=1), rng.random_range(-1..=1))
}

/// Move the agent one step along its heading with toroidal wrap.
///
/// If one-agent-per-cell is enforced and the destination holds another
/// agent, the move is rejected and the agent stays put.
pub fn place(agent: &mut Agent, grid: &mut SparseGrid, one_agent_per_cell: bool) {
    let destination = grid.wrap(Position::new(
        agent.position.x.saturating_add(agent.heading.dx),
        agent.position.y.saturating_add(agent.heading.dy),
    ));
    if one_agent_per_cell && grid.occupied_by_other(destination, agent.id) {
        return;
    }
    agent.position = grid.place(agent.id, destination);
}

/// Random-walk movement.
///
/// With probability `activity_rate` the agent is inactive and does not
/// move this tick. Otherwise, with probability `direction_change_rate`
/// the heading is re-randomized (possibly to the stationary heading),
/// and the agent is placed one step along its heading.
pub fn wander(
    agent: &mut Agent,
    grid: &mut SparseGrid,
    settings: &MovementSettings,
    rng: &mut impl Rng,
) {
    if rng.random_bool(settings.activity_rate) {
        return;
    }
    if rng.random_bool(settings.direction_change_rate) {
        agent.heading = random_heading(rng);
    }
    place(agent, grid, settings.one_agent_per_cell);
}

/// Aggregation movement: head toward the local crowd.
///
/// Inspects the agent's Moore neighborhood and, per axis, sets the
/// heading toward whichever side holds more neighbors; ties are broken
/// by a fresh random component in `{-1, 0, 1}`. The agent is then
/// placed exactly as in [`wander`].
pub fn aggregate(
    agent: &mut Agent,
    grid: &mut SparseGrid,
    settings: &MovementSettings,
    rng: &mut impl Rng,
) {
    let neighbors = grid.moore_neighbors(agent.position, settings.aggregation_radius);
    agent.heading = Heading::new(
        decide_axis(agent.position.x, neighbors.iter().map(|(_, cell)| cell.x), rng),
        decide_axis(agent.position.y, neighbors.iter().map(|(_, cell)| cell.y), rng),
    );
    place(agent, grid, settings.one_agent_per_cell);
}

/// Majority vote along one axis: `1` if more neighbors lie on the
/// positive side of `center`, `-1` if more lie on the negative side,
/// and a fresh random step on a tie.
fn decide_axis(center: i32, coordinates: impl Iterator<Item = i32>, rng: &mut impl Rng) -> i32 {
    let mut positive: u32 = 0;
    let mut negative: u32 = 0;
    for coordinate in coordinates {
        if coordinate > center {
            positive = positive.saturating_add(1);
        } else if coordinate < center {
            negative = negative.saturating_add(1);
        }
    }
    match positive.cmp(&negative) {
        core::cmp::Ordering::Greater => 1,
        core::cmp::Ordering::Less => -1,
        core::cmp::Ordering::Equal => rng.random_range(-1..=1),
    }
}

#[cfg(test)]
mod tests {
    use courtship_types::Gender;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::error::WorldError;

    fn make_grid(width: i32, height: i32) -> Result<SparseGrid, WorldError> {
        SparseGrid::new(width, height)
    }

    fn placed_agent(grid: &mut SparseGrid, position: Position, heading: Heading) -> Agent {
        let mut agent = Agent::new(Gender::Female, 5.0, position);
        agent.heading = heading;
        agent.position = grid.place(agent.id, position);
        agent
    }

    /// Settings that always move and never re-randomize the heading.
    const fn deterministic() -> MovementSettings {
        MovementSettings {
            activity_rate: 0.0,
            direction_change_rate: 0.0,
            aggregation_radius: 1,
            one_agent_per_cell: false,
        }
    }

    #[test]
    fn wander_wraps_around_both_edges() -> Result<(), WorldError> {
        let mut grid = make_grid(10, 8)?;
        let mut rng = SmallRng::seed_from_u64(1);
        let settings = deterministic();

        let mut agent = placed_agent(&mut grid, Position::new(9, 0), Heading::new(1, 0));
        wander(&mut agent, &mut grid, &settings, &mut rng);
        assert_eq!(agent.position, Position::new(0, 0), "x must wrap W-1 -> 0");

        let mut agent = placed_agent(&mut grid, Position::new(0, 7), Heading::new(0, 1));
        wander(&mut agent, &mut grid, &settings, &mut rng);
        assert_eq!(agent.position, Position::new(0, 0), "y must wrap H-1 -> 0");

        let mut agent = placed_agent(&mut grid, Position::new(0, 0), Heading::new(-1, -1));
        wander(&mut agent, &mut grid, &settings, &mut rng);
        assert_eq!(agent.position, Position::new(9, 7), "negative steps wrap too");
        Ok(())
    }

    #[test]
    fn inactive_agents_stay_put() -> Result<(), WorldError> {
        let mut grid = make_grid(10, 8)?;
        let mut rng = SmallRng::seed_from_u64(2);
        let settings = MovementSettings {
            activity_rate: 1.0, // always inactive
            ..deterministic()
        };

        let mut agent = placed_agent(&mut grid, Position::new(4, 4), Heading::new(1, 1));
        for _ in 0..20 {
            wander(&mut agent, &mut grid, &settings, &mut rng);
        }
        assert_eq!(agent.position, Position::new(4, 4));
        Ok(())
    }

    #[test]
    fn occupied_destination_blocks_the_move() -> Result<(), WorldError> {
        let mut grid = make_grid(10, 8)?;
        let mut rng = SmallRng::seed_from_u64(3);
        let settings = MovementSettings {
            one_agent_per_cell: true,
            ..deterministic()
        };

        let blocker = placed_agent(&mut grid, Position::new(5, 4), Heading::new(0, 0));
        let mut agent = placed_agent(&mut grid, Position::new(4, 4), Heading::new(1, 0));

        wander(&mut agent, &mut grid, &settings, &mut rng);
        assert_eq!(agent.position, Position::new(4, 4), "move must be rejected");
        assert_eq!(grid.position_of(blocker.id), Some(Position::new(5, 4)));

        // Without the policy the agents share the cell.
        let relaxed = MovementSettings {
            one_agent_per_cell: false,
            ..deterministic()
        };
        wander(&mut agent, &mut grid, &relaxed, &mut rng);
        assert_eq!(agent.position, Position::new(5, 4));
        Ok(())
    }

    #[test]
    fn heading_rerandomizes_when_the_draw_says_so() -> Result<(), WorldError> {
        let mut grid = make_grid(10, 8)?;
        let settings = MovementSettings {
            direction_change_rate: 1.0, // always re-randomize
            ..deterministic()
        };

        // Over many draws the heading must leave its initial value at
        // least once; each component covers {-1, 0, 1}.
        let mut rng = SmallRng::seed_from_u64(4);
        let mut agent = placed_agent(&mut grid, Position::new(4, 4), Heading::new(1, 0));
        let mut changed = false;
        for _ in 0..50 {
            wander(&mut agent, &mut grid, &settings, &mut rng);
            assert!((-1..=1).contains(&agent.heading.dx));
            assert!((-1..=1).contains(&agent.heading.dy));
            if agent.heading != Heading::new(1, 0) {
                changed = true;
            }
        }
        assert!(changed, "heading must be re-randomized eventually");
        Ok(())
    }

    #[test]
    fn aggregate_heads_toward_the_crowd() -> Result<(), WorldError> {
        let mut grid = make_grid(20, 20)?;
        let mut rng = SmallRng::seed_from_u64(5);
        let settings = MovementSettings {
            aggregation_radius: 3,
            ..deterministic()
        };

        // Two neighbors strictly to the +x side, same row: the x vote is
        // decisive, the y vote ties and is broken randomly.
        placed_agent(&mut grid, Position::new(7, 10), Heading::new(0, 0));
        placed_agent(&mut grid, Position::new(8, 10), Heading::new(0, 0));
        let mut agent = placed_agent(&mut grid, Position::new(5, 10), Heading::new(0, 0));

        aggregate(&mut agent, &mut grid, &settings, &mut rng);
        assert_eq!(agent.heading.dx, 1, "must head toward the crowd on x");
        assert_eq!(agent.position.x, 6);
        Ok(())
    }

    #[test]
    fn aggregate_with_no_neighbors_breaks_ties_randomly() -> Result<(), WorldError> {
        let mut grid = make_grid(20, 20)?;
        let mut rng = SmallRng::seed_from_u64(6);
        let settings = deterministic();

        let mut agent = placed_agent(&mut grid, Position::new(5, 5), Heading::new(0, 0));
        for _ in 0..20 {
            aggregate(&mut agent, &mut grid, &settings, &mut rng);
            assert!((-1..=1).contains(&agent.heading.dx));
            assert!((-1..=1).contains(&agent.heading.dy));
        }
        Ok(())
    }
}
