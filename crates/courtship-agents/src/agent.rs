//! Agent creation.
//!
//! Factory functions for the two ways agents enter the simulation:
//! seeding at initialization and replication after a successful couple.
//! Both draw a fresh integer attractiveness in `[1, max_attractiveness]`
//! and a uniform random position inside the grid; gender is supplied by
//! the caller (replication preserves the dissolving parent's gender so
//! the gender ratio stays constant).

use courtship_types::{Agent, Gender, Position};
use rand::Rng;

use crate::config::ModelParams;

/// Draw a fresh attractiveness score: a uniform integer in
/// `[1, max_attractiveness]`, represented as `f64` for the rule formulas.
pub fn fresh_attractiveness(params: &ModelParams, rng: &mut impl Rng) -> f64 {
    f64::from(rng.random_range(1..=params.max_attractiveness))
}

/// Draw a uniform random position inside a `width` x `height` grid.
///
/// Both dimensions must be positive; the caller validates grid bounds
/// at startup.
pub fn random_position(width: i32, height: i32, rng: &mut impl Rng) -> Position {
    Position::new(rng.random_range(0..width.max(1)), rng.random_range(0..height.max(1)))
}

/// Create a replacement agent of the given gender.
///
/// The agent gets a fresh attractiveness, a fresh random position, the
/// default `(0, 0)` heading, `dates = 0`, `frustration = 1`, and an
/// unset dated flag. Registration with the schedule, pools, grid, and
/// portrayal is the environment's job.
pub fn replacement_agent(
    gender: Gender,
    params: &ModelParams,
    width: i32,
    height: i32,
    rng: &mut impl Rng,
) -> Agent {
    let attractiveness = fresh_attractiveness(params, rng);
    Agent::new(gender, attractiveness, random_position(width, height, rng))
}
