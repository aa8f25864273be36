//! Enumeration types for the mate-choice model.
//!
//! Covers agent gender, the selectable dating-decision rule, and the
//! partner-discovery mode (population-wide versus spatial neighborhood).

use serde::{Deserialize, Serialize};

/// Biological gender of an agent, fixed at creation.
///
/// The population is partitioned by gender; agents only ever date agents
/// of the opposite gender, and replacement agents inherit the gender of
/// the agent they replace so the gender ratio stays constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Female agent.
    Female,
    /// Male agent.
    Male,
}

impl Gender {
    /// Return the opposite gender.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Female => Self::Male,
            Self::Male => Self::Female,
        }
    }
}

impl core::fmt::Display for Gender {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Female => write!(f, "female"),
            Self::Male => write!(f, "male"),
        }
    }
}

/// The dating-probability rule used by both partners in a couple decision.
///
/// Any unrecognized value in configuration deserializes to
/// [`DecisionRule::Attractive`]; rule selection never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionRule {
    /// Prefer partners of similar attractiveness.
    Similar,
    /// Arithmetic mean of the attractiveness and similarity rules.
    Mixed,
    /// Frustration-weighted blend: attractiveness-seeking decays toward
    /// similarity-seeking as the agent accumulates failed dates.
    Frustration,
    /// Prefer more attractive partners (steepness set by choosiness).
    ///
    /// Declared last so the `#[serde(other)]` fallback is legal: serde
    /// requires the catch-all to be the final variant.
    #[default]
    #[serde(other)]
    Attractive,
}

impl core::fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Similar => write!(f, "similar"),
            Self::Mixed => write!(f, "mixed"),
            Self::Frustration => write!(f, "frustration"),
            Self::Attractive => write!(f, "attractive"),
        }
    }
}

/// How an agent discovers a prospective partner each round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatingMode {
    /// Sample uniformly from the whole opposite-gender population.
    #[default]
    Global,
    /// Search the agent's toroidal Moore neighborhood on the grid.
    Spatial,
}

impl core::fmt::Display for DatingMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Spatial => write!(f, "spatial"),
        }
    }
}
