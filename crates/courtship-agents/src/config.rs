//! Model parameters for the Kalick–Hamilton mate-choice rules.
//!
//! The [`ModelParams`] struct bundles every tunable of the dating model
//! so that callers (rule engine, pairing protocol, movement, tests) can
//! override defaults. The engine constructs it from the `model` section
//! of `courtship-config.yaml` at simulation start and passes it into
//! every core function; nothing in the model reads ambient global state.

use courtship_types::{DatingMode, DecisionRule};
use serde::Deserialize;

/// Errors raised when model parameters are mathematically unusable.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    /// A parameter value makes one or more rules undefined.
    #[error("invalid model parameters: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the parameters.
        reason: String,
    },
}

/// Tunable parameters of the mate-choice model.
///
/// Several rules divide by `max_attractiveness`, `max_dates`, or
/// `max_frustration`; [`ModelParams::validate`] rejects degenerate values
/// at startup so the rule engine never divides by zero mid-simulation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelParams {
    /// Exponent applied by the attractiveness and similarity rules;
    /// higher values make agents choosier (default: 3.0).
    #[serde(default = "default_choosiness")]
    pub choosiness: f64,

    /// Upper bound of the attractiveness scale; scores are drawn from
    /// `[1, max_attractiveness]` (default: 10).
    #[serde(default = "default_max_attractiveness")]
    pub max_attractiveness: u32,

    /// Frustration cap; the frustration counter never exceeds this value
    /// (default: 5).
    #[serde(default = "default_max_frustration")]
    pub max_frustration: u32,

    /// Dating-attempt budget per life; drives the closing-time rule
    /// (default: 50).
    #[serde(default = "default_max_dates")]
    pub max_dates: u32,

    /// Which dating-probability rule both partners apply.
    #[serde(default)]
    pub rule: DecisionRule,

    /// Partner-discovery mode: population-wide or spatial neighborhood.
    #[serde(default)]
    pub dating: DatingMode,

    /// Moore-neighborhood radius used for partner discovery in spatial
    /// mode (default: 5).
    #[serde(default = "default_date_search_radius")]
    pub date_search_radius: u32,

    /// Moore-neighborhood radius inspected by the aggregation behavior
    /// (default: 1).
    #[serde(default = "default_aggregation_radius")]
    pub aggregation_radius: u32,

    /// Probability that an agent skips movement entirely on a tick
    /// (default: 0.0, every agent moves every tick).
    #[serde(default)]
    pub activity_rate: f64,

    /// Probability that a moving agent re-randomizes its heading before
    /// placement (default: 0.5).
    #[serde(default = "default_direction_change_rate")]
    pub direction_change_rate: f64,

    /// Probability that an agent aggregates toward neighbors instead of
    /// wandering (default: 0.0).
    #[serde(default)]
    pub aggregation_rate: f64,

    /// When true, a move is rejected if the destination cell is occupied.
    #[serde(default)]
    pub one_agent_per_cell: bool,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            choosiness: default_choosiness(),
            max_attractiveness: default_max_attractiveness(),
            max_frustration: default_max_frustration(),
            max_dates: default_max_dates(),
            rule: DecisionRule::default(),
            dating: DatingMode::default(),
            date_search_radius: default_date_search_radius(),
            aggregation_radius: default_aggregation_radius(),
            activity_rate: 0.0,
            direction_change_rate: default_direction_change_rate(),
            aggregation_rate: 0.0,
            one_agent_per_cell: false,
        }
    }
}

impl ModelParams {
    /// Check that every parameter keeps the rule family well defined.
    ///
    /// Rejects zero maxima (division by zero or degenerate exponents),
    /// non-positive choosiness (would push probabilities outside `[0, 1]`),
    /// and rates outside `[0, 1]` (Bernoulli draws require probabilities).
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Invalid`] naming the offending parameter.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.max_attractiveness == 0 {
            return Err(ParamsError::Invalid {
                reason: "max_attractiveness must be at least 1".to_owned(),
            });
        }
        if self.max_frustration == 0 {
            return Err(ParamsError::Invalid {
                reason: "max_frustration must be at least 1".to_owned(),
            });
        }
        if self.max_dates == 0 {
            return Err(ParamsError::Invalid {
                reason: "max_dates must be at least 1".to_owned(),
            });
        }
        if !self.choosiness.is_finite() || self.choosiness <= 0.0 {
            return Err(ParamsError::Invalid {
                reason: format!("choosiness must be positive, got {}", self.choosiness),
            });
        }
        for (name, rate) in [
            ("activity_rate", self.activity_rate),
            ("direction_change_rate", self.direction_change_rate),
            ("aggregation_rate", self.aggregation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ParamsError::Invalid {
                    reason: format!("{name} must be in [0, 1], got {rate}"),
                });
            }
        }
        Ok(())
    }

    /// The attractiveness ceiling as a float, for use in the rule formulas.
    pub fn max_attractiveness_f64(&self) -> f64 {
        f64::from(self.max_attractiveness)
    }
}

const fn default_choosiness() -> f64 {
    3.0
}

const fn default_max_attractiveness() -> u32 {
    10
}

const fn default_max_frustration() -> u32 {
    5
}

const fn default_max_dates() -> u32 {
    50
}

const fn default_date_search_radius() -> u32 {
    5
}

const fn default_aggregation_radius() -> u32 {
    1
}

const fn default_direction_change_rate() -> f64 {
    0.5
}
