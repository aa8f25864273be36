//! Optional visual portrayal of agents.
//!
//! The lifecycle requests a portrayal for every agent that enters the
//! simulation: color by gender, opacity by normalized attractiveness.
//! Rendering is an external concern, so the environment only talks to
//! the [`Portrayal`] trait; the bundled [`NoOpPortrayal`] satisfies it
//! for headless runs.

use courtship_agents::ModelParams;
use courtship_types::{Agent, Gender};

/// An RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortrayalColor {
    /// Red component.
    pub red: f32,
    /// Green component.
    pub green: f32,
    /// Blue component.
    pub blue: f32,
}

/// Color used for female agents.
pub const FEMALE_COLOR: PortrayalColor = PortrayalColor {
    red: 1.0,
    green: 0.0,
    blue: 0.0,
};

/// Color used for male agents.
pub const MALE_COLOR: PortrayalColor = PortrayalColor {
    red: 0.0,
    green: 0.0,
    blue: 1.0,
};

/// The portrayal color for a gender: red for female, blue for male.
pub const fn gender_color(gender: Gender) -> PortrayalColor {
    match gender {
        Gender::Female => FEMALE_COLOR,
        Gender::Male => MALE_COLOR,
    }
}

/// Portrayal opacity: the agent's attractiveness normalized to `[0, 1]`.
pub fn attractiveness_opacity(agent: &Agent, params: &ModelParams) -> f64 {
    (agent.attractiveness / params.max_attractiveness_f64()).clamp(0.0, 1.0)
}

/// A sink for agent visuals.
pub trait Portrayal {
    /// Request a visual representation for a newly registered agent.
    fn portray(&mut self, agent: &Agent, color: PortrayalColor, opacity: f64);
}

/// A portrayal that renders nothing, for headless runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPortrayal;

impl Portrayal for NoOpPortrayal {
    fn portray(&mut self, _agent: &Agent, _color: PortrayalColor, _opacity: f64) {}
}
