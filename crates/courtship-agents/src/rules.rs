//! The Kalick–Hamilton dating-probability rules.
//!
//! Pure, stateless functions of two agents and the global
//! [`ModelParams`]. Every function returns a probability in `[0, 1]`
//! for agents whose attractiveness lies in `[1, max_attractiveness]`
//! and validated parameters.
//!
//! The rule family:
//!
//! - [`attractiveness_rule`] -- prefer more attractive partners
//! - [`similarity_rule`] -- prefer partners of similar attractiveness
//! - [`mixed_rule`] -- arithmetic mean of the two
//! - [`frustration_blended_rule`] -- attractiveness-seeking decays toward
//!   similarity-seeking as failed dates accumulate
//! - [`closing_time_rule`] -- exponent adjustment that pushes acceptance
//!   toward certainty as an agent nears its dating budget
//!
//! Each agent evaluates its partner from its own perspective, so a
//! couple decision computes two generally different probabilities.

use courtship_types::{Agent, DecisionRule};

use crate::config::ModelParams;

/// Probability of accepting `partner` based on the partner's
/// attractiveness alone: `(partner / max) ^ choosiness`.
///
/// Monotonically non-decreasing in the partner's attractiveness; the
/// seeker's own attributes play no part, so the rule is asymmetric
/// between the two members of a couple.
pub fn attractiveness_rule(partner: &Agent, params: &ModelParams) -> f64 {
    (partner.attractiveness / params.max_attractiveness_f64()).powf(params.choosiness)
}

/// Probability of accepting `partner` based on how close the two
/// attractiveness scores are: `(1 - |seeker - partner| / max) ^ choosiness`.
///
/// Symmetric in its two agents.
pub fn similarity_rule(seeker: &Agent, partner: &Agent, params: &ModelParams) -> f64 {
    let gap = (seeker.attractiveness - partner.attractiveness).abs();
    (1.0 - gap / params.max_attractiveness_f64()).powf(params.choosiness)
}

/// Arithmetic mean of [`attractiveness_rule`] and [`similarity_rule`].
pub fn mixed_rule(seeker: &Agent, partner: &Agent, params: &ModelParams) -> f64 {
    (attractiveness_rule(partner, params) + similarity_rule(seeker, partner, params)) / 2.0
}

/// The FR step function weighting attractiveness-seeking by frustration.
///
/// Returns `(max_frustration + 1 - frustration) / max_frustration` while
/// `frustration <= max_frustration`, and 0 beyond it. A fresh agent
/// (frustration 1) weights attractiveness fully; the weight falls
/// linearly as failures accumulate.
pub fn frustration_weight(seeker: &Agent, params: &ModelParams) -> f64 {
    let max = f64::from(params.max_frustration);
    let frustration = f64::from(seeker.frustration);
    if frustration <= max {
        (max + 1.0 - frustration) / max
    } else {
        0.0
    }
}

/// Frustration-blended probability: `FR * p_attractive + (1 - FR) * p_similar`
/// where `FR` is [`frustration_weight`] of the seeker.
pub fn frustration_blended_rule(seeker: &Agent, partner: &Agent, params: &ModelParams) -> f64 {
    let fr = frustration_weight(seeker, params);
    fr * attractiveness_rule(partner, params)
        + (1.0 - fr) * similarity_rule(seeker, partner, params)
}

/// The closing-time exponent: `max(0, (max_dates - dates) / max_dates)`.
///
/// Shrinks toward 0 as the seeker approaches its dating budget. A
/// `max_dates` of 0 is rejected by parameter validation; it is guarded
/// here anyway so the rule layer is total.
pub fn closing_time_exponent(seeker: &Agent, params: &ModelParams) -> f64 {
    if params.max_dates == 0 || seeker.dates >= params.max_dates {
        return 0.0;
    }
    f64::from(params.max_dates.saturating_sub(seeker.dates)) / f64::from(params.max_dates)
}

/// Apply the closing-time adjustment to a base probability: `p ^ ct`.
///
/// At `dates == 0` this is the identity; at `dates == max_dates` the
/// exponent is 0 and the result is 1 regardless of `p` -- the agent
/// settles for anyone.
pub fn closing_time_rule(seeker: &Agent, p: f64, params: &ModelParams) -> f64 {
    p.powf(closing_time_exponent(seeker, params))
}

/// Base acceptance probability of `partner` by `seeker` under the given rule.
pub fn acceptance_probability(
    rule: DecisionRule,
    seeker: &Agent,
    partner: &Agent,
    params: &ModelParams,
) -> f64 {
    match rule {
        DecisionRule::Attractive => attractiveness_rule(partner, params),
        DecisionRule::Similar => similarity_rule(seeker, partner, params),
        DecisionRule::Mixed => mixed_rule(seeker, partner, params),
        DecisionRule::Frustration => frustration_blended_rule(seeker, partner, params),
    }
}

/// Full dating probability: the configured rule adjusted by closing time,
/// clamped to `[0, 1]` against float drift so the result is always a
/// legal Bernoulli parameter.
pub fn dating_probability(
    rule: DecisionRule,
    seeker: &Agent,
    partner: &Agent,
    params: &ModelParams,
) -> f64 {
    let base = acceptance_probability(rule, seeker, partner, params);
    closing_time_rule(seeker, base, params).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use courtship_types::{Gender, Position};

    use super::*;

    fn agent(gender: Gender, attractiveness: f64) -> Agent {
        Agent::new(gender, attractiveness, Position::default())
    }

    fn assert_probability(value: f64, context: &str) {
        assert!(
            (0.0..=1.0).contains(&value),
            "{context}: {value} is not a probability"
        );
    }

    // -----------------------------------------------------------------------
    // Range: every rule stays in [0, 1]
    // -----------------------------------------------------------------------

    #[test]
    fn all_rules_return_probabilities() {
        let params = ModelParams::default();
        for seeker_attr in 1..=params.max_attractiveness {
            for partner_attr in 1..=params.max_attractiveness {
                let mut seeker = agent(Gender::Female, f64::from(seeker_attr));
                let partner = agent(Gender::Male, f64::from(partner_attr));
                for frustration in 1..=params.max_frustration {
                    seeker.frustration = frustration;
                    for dates in [0, 1, params.max_dates / 2, params.max_dates] {
                        seeker.dates = dates;
                        assert_probability(
                            attractiveness_rule(&partner, &params),
                            "attractiveness",
                        );
                        assert_probability(
                            similarity_rule(&seeker, &partner, &params),
                            "similarity",
                        );
                        assert_probability(mixed_rule(&seeker, &partner, &params), "mixed");
                        assert_probability(frustration_weight(&seeker, &params), "weight");
                        assert_probability(
                            frustration_blended_rule(&seeker, &partner, &params),
                            "blended",
                        );
                        for rule in [
                            DecisionRule::Attractive,
                            DecisionRule::Similar,
                            DecisionRule::Mixed,
                            DecisionRule::Frustration,
                        ] {
                            assert_probability(
                                dating_probability(rule, &seeker, &partner, &params),
                                "dating",
                            );
                        }
                    }
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Attractiveness rule
    // -----------------------------------------------------------------------

    #[test]
    fn attractiveness_rule_is_monotone_in_partner() {
        let params = ModelParams::default();
        let mut previous = 0.0;
        for attr in 1..=params.max_attractiveness {
            let partner = agent(Gender::Male, f64::from(attr));
            let p = attractiveness_rule(&partner, &params);
            assert!(
                p >= previous,
                "p must not decrease as partner attractiveness rises"
            );
            previous = p;
        }
    }

    #[test]
    fn top_attractiveness_is_certain_acceptance() {
        let params = ModelParams::default();
        let partner = agent(Gender::Male, params.max_attractiveness_f64());
        assert!((attractiveness_rule(&partner, &params) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn attractiveness_rule_is_asymmetric() {
        let params = ModelParams::default();
        let plain = agent(Gender::Female, 2.0);
        let stunning = agent(Gender::Male, 9.0);
        let toward_stunning = attractiveness_rule(&stunning, &params);
        let toward_plain = attractiveness_rule(&plain, &params);
        assert!(
            (toward_stunning - toward_plain).abs() > 1e-9,
            "the two perspectives must differ when attractiveness differs"
        );
    }

    // -----------------------------------------------------------------------
    // Similarity rule
    // -----------------------------------------------------------------------

    #[test]
    fn similarity_rule_is_symmetric() {
        let params = ModelParams::default();
        let a = agent(Gender::Female, 3.0);
        let b = agent(Gender::Male, 8.0);
        let ab = similarity_rule(&a, &b, &params);
        let ba = similarity_rule(&b, &a, &params);
        assert!((ab - ba).abs() < 1e-12, "similarity must be symmetric");
    }

    #[test]
    fn equal_attractiveness_maximizes_similarity() {
        let params = ModelParams::default();
        let a = agent(Gender::Female, 6.0);
        let twin = agent(Gender::Male, 6.0);
        let distant = agent(Gender::Male, 1.0);
        assert!((similarity_rule(&a, &twin, &params) - 1.0).abs() < 1e-12);
        assert!(similarity_rule(&a, &distant, &params) < 1.0);
    }

    #[test]
    fn mixed_rule_is_the_mean() {
        let params = ModelParams::default();
        let a = agent(Gender::Female, 4.0);
        let b = agent(Gender::Male, 9.0);
        let expected =
            (attractiveness_rule(&b, &params) + similarity_rule(&a, &b, &params)) / 2.0;
        assert!((mixed_rule(&a, &b, &params) - expected).abs() < 1e-12);
    }

    // -----------------------------------------------------------------------
    // Frustration rule
    // -----------------------------------------------------------------------

    #[test]
    fn frustration_weight_steps_to_zero_past_maximum() {
        let mut params = ModelParams::default();
        params.max_frustration = 5;
        let mut seeker = agent(Gender::Female, 5.0);

        // Fresh agent: full attractiveness weighting.
        seeker.frustration = 1;
        assert!((frustration_weight(&seeker, &params) - 1.0).abs() < 1e-12);

        // Weight decreases with each failure and stays positive at the cap.
        let mut previous = 2.0;
        for frustration in 1..=5 {
            seeker.frustration = frustration;
            let weight = frustration_weight(&seeker, &params);
            assert!(weight > 0.0, "weight must stay positive up to the cap");
            assert!(weight < previous, "weight must strictly decrease");
            previous = weight;
        }

        // Beyond the cap (reachable only by direct state manipulation,
        // since increments are capped) the weight is exactly 0.
        seeker.frustration = 6;
        assert!(frustration_weight(&seeker, &params).abs() < f64::EPSILON);
    }

    #[test]
    fn blended_rule_interpolates_between_rules() {
        let params = ModelParams::default();
        let mut seeker = agent(Gender::Female, 3.0);
        let partner = agent(Gender::Male, 9.0);

        // Fresh agent: pure attractiveness rule.
        seeker.frustration = 1;
        let blended = frustration_blended_rule(&seeker, &partner, &params);
        assert!((blended - attractiveness_rule(&partner, &params)).abs() < 1e-12);

        // Past the cap: pure similarity rule.
        seeker.frustration = params.max_frustration.saturating_add(1);
        let blended = frustration_blended_rule(&seeker, &partner, &params);
        assert!((blended - similarity_rule(&seeker, &partner, &params)).abs() < 1e-12);
    }

    // -----------------------------------------------------------------------
    // Closing-time rule
    // -----------------------------------------------------------------------

    #[test]
    fn closing_time_is_identity_for_fresh_agents() {
        let params = ModelParams::default();
        let seeker = agent(Gender::Female, 5.0);
        assert!((closing_time_exponent(&seeker, &params) - 1.0).abs() < 1e-12);
        assert!((closing_time_rule(&seeker, 0.37, &params) - 0.37).abs() < 1e-12);
    }

    #[test]
    fn closing_time_forces_acceptance_at_the_budget() {
        let params = ModelParams::default();
        let mut seeker = agent(Gender::Female, 5.0);
        seeker.dates = params.max_dates;
        assert!(closing_time_exponent(&seeker, &params).abs() < f64::EPSILON);
        for p in [0.0, 0.01, 0.5, 1.0] {
            assert!(
                (closing_time_rule(&seeker, p, &params) - 1.0).abs() < 1e-12,
                "p^0 must be 1 even for p = {p}"
            );
        }
    }

    #[test]
    fn closing_time_exponent_guards_zero_budget() {
        let mut params = ModelParams::default();
        params.max_dates = 0;
        let seeker = agent(Gender::Female, 5.0);
        assert!(closing_time_exponent(&seeker, &params).abs() < f64::EPSILON);
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    #[test]
    fn dispatch_selects_the_configured_rule() {
        let params = ModelParams::default();
        let seeker = agent(Gender::Female, 3.0);
        let partner = agent(Gender::Male, 8.0);

        let attractive =
            acceptance_probability(DecisionRule::Attractive, &seeker, &partner, &params);
        assert!((attractive - attractiveness_rule(&partner, &params)).abs() < 1e-12);

        let similar = acceptance_probability(DecisionRule::Similar, &seeker, &partner, &params);
        assert!((similar - similarity_rule(&seeker, &partner, &params)).abs() < 1e-12);

        let mixed = acceptance_probability(DecisionRule::Mixed, &seeker, &partner, &params);
        assert!((mixed - mixed_rule(&seeker, &partner, &params)).abs() < 1e-12);

        let blended =
            acceptance_probability(DecisionRule::Frustration, &seeker, &partner, &params);
        assert!((blended - frustration_blended_rule(&seeker, &partner, &params)).abs() < 1e-12);
    }
}
