//! Weighted compatibility scoring between a seeking and an offering profile.
//!
//! The weights were tuned by eye against a small sample of profiles. They are
//! kept together here as plain numbers so they can be adjusted without
//! touching the rule logic.

use crate::config::MatchPolicy;
use crate::models::{RoleDetails, RoommateProfile};

/// Stretch tolerance for budget-vs-rent: a seeker can usually go a bit over
/// their stated ceiling.
pub const BUDGET_STRETCH_FACTOR: f64 = 1.20;

#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub location_match: f64,
    pub budget_within: f64,
    pub budget_stretch: f64,
    pub room_size_listed: f64,
    pub smoker_conflict: f64,
    pub no_pets_conflict: f64,
    pub pets_allowed_bonus: f64,
    pub quiet_hours_bonus: f64,
    pub social_bonus: f64,
    pub gender_match: f64,
    pub gender_other: f64,
    pub age_close: f64,
    pub age_near: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            location_match: 3.0,
            budget_within: 2.0,
            budget_stretch: 1.0,
            room_size_listed: 0.5,
            smoker_conflict: -2.0,
            no_pets_conflict: -1.0,
            pets_allowed_bonus: 0.5,
            quiet_hours_bonus: 1.0,
            social_bonus: 0.5,
            gender_match: 1.5,
            gender_other: 0.5,
            age_close: 1.5,
            age_near: 0.5,
        }
    }
}

/// Raw score for a requester/candidate pair. Orientation-free: the rules
/// always read preferences from the seeking side and room facts from the
/// offering side, whichever of the two the requester happens to be. A
/// missing attribute on either side skips that rule entirely.
pub fn compatibility_score(a: &RoommateProfile, b: &RoommateProfile, w: &ScoringWeights) -> f64 {
    let (seeker, offerer) = match (&a.details, &b.details) {
        (RoleDetails::Seeking { .. }, RoleDetails::Offering { .. }) => (a, b),
        (RoleDetails::Offering { .. }, RoleDetails::Seeking { .. }) => (b, a),
        // Same-role pairs never reach the scorer through the assembler.
        _ => return 0.0,
    };

    let (preferences, budget) = match &seeker.details {
        RoleDetails::Seeking {
            preferences,
            budget,
            ..
        } => (preferences, *budget),
        RoleDetails::Offering { .. } => unreachable!(),
    };
    let (rent, room_size, house_rules) = match &offerer.details {
        RoleDetails::Offering {
            rent,
            room_size,
            house_rules,
            ..
        } => (*rent, room_size.as_deref(), house_rules.as_deref()),
        RoleDetails::Seeking { .. } => unreachable!(),
    };

    let mut score = 0.0;

    if let (Some(want), Some(have)) = (seeker.location.as_deref(), offerer.location.as_deref()) {
        let want = want.trim().to_lowercase();
        let have = have.trim().to_lowercase();
        if !want.is_empty() && !have.is_empty() && (want.contains(&have) || have.contains(&want)) {
            score += w.location_match;
        }
    }

    if let (Some(budget), Some(rent)) = (budget, rent) {
        if budget >= rent {
            score += w.budget_within;
        } else if budget * BUDGET_STRETCH_FACTOR >= rent {
            score += w.budget_stretch;
        }
    }

    // Listing a room size at all is a signal of effort, not of fit.
    if room_size.is_some_and(|s| !s.trim().is_empty()) {
        score += w.room_size_listed;
    }

    if let Some(rules) = house_rules {
        let rules = rules.to_lowercase();
        if has_preference(preferences, "non-smoker") && rules.contains("smoker") {
            score += w.smoker_conflict;
        }
        if has_preference(preferences, "pet-friendly") {
            if rules.contains("no pets") {
                score += w.no_pets_conflict;
            }
        } else if rules.contains("pets allowed") {
            score += w.pets_allowed_bonus;
        }
        if has_preference(preferences, "quiet") && rules.contains("quiet hours") {
            score += w.quiet_hours_bonus;
        }
        if has_preference(preferences, "social") && !rules.contains("no parties") {
            score += w.social_bonus;
        }
    }

    if let (Some(g1), Some(g2)) = (a.gender.as_deref(), b.gender.as_deref()) {
        let g1 = g1.trim().to_lowercase();
        let g2 = g2.trim().to_lowercase();
        if !g1.is_empty() && !g2.is_empty() {
            if g1 == g2 {
                score += w.gender_match;
            } else if g1 == "other" || g2 == "other" {
                score += w.gender_other;
            }
        }
    }

    if let (Some(age1), Some(age2)) = (a.age, b.age) {
        let diff = (age1 - age2).abs();
        if diff <= 5 {
            score += w.age_close;
        } else if diff <= 10 {
            score += w.age_near;
        }
    }

    score
}

fn has_preference(preferences: &[String], wanted: &str) -> bool {
    preferences
        .iter()
        .any(|p| p.trim().eq_ignore_ascii_case(wanted))
}

/// User-facing compatibility percentage: floored and capped so even a weak
/// or strongly negative raw score renders as something presentable.
pub fn display_percentage(score: f64, policy: &MatchPolicy) -> i64 {
    let raw = (policy.display_base + score * policy.display_scale).round() as i64;
    raw.clamp(policy.display_floor, policy.display_cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoleDetails;

    fn seeker() -> RoommateProfile {
        RoommateProfile {
            user_id: "u1".to_string(),
            name: "Asha".to_string(),
            age: None,
            gender: None,
            location: None,
            bio: None,
            details: RoleDetails::Seeking {
                sleep_schedule: None,
                cleanliness: None,
                preferences: Vec::new(),
                budget: None,
            },
        }
    }

    fn offerer() -> RoommateProfile {
        RoommateProfile {
            user_id: "u2".to_string(),
            name: "Ben".to_string(),
            age: None,
            gender: None,
            location: None,
            bio: None,
            details: RoleDetails::Offering {
                rooms: None,
                rent: None,
                room_size: None,
                house_rules: None,
                available_from: None,
            },
        }
    }

    fn set_seeking(profile: &mut RoommateProfile, preferences: &[&str], budget: Option<f64>) {
        profile.details = RoleDetails::Seeking {
            sleep_schedule: None,
            cleanliness: None,
            preferences: preferences.iter().map(|p| p.to_string()).collect(),
            budget,
        };
    }

    fn set_offering(
        profile: &mut RoommateProfile,
        rent: Option<f64>,
        room_size: Option<&str>,
        house_rules: Option<&str>,
    ) {
        profile.details = RoleDetails::Offering {
            rooms: None,
            rent,
            room_size: room_size.map(String::from),
            house_rules: house_rules.map(String::from),
            available_from: None,
        };
    }

    fn w() -> ScoringWeights {
        ScoringWeights::default()
    }

    #[test]
    fn empty_profiles_score_zero() {
        assert_eq!(compatibility_score(&seeker(), &offerer(), &w()), 0.0);
    }

    #[test]
    fn identical_location_contributes_exactly_three() {
        let mut s = seeker();
        let mut o = offerer();
        s.location = Some("Bristol".to_string());
        o.location = Some("bristol".to_string());
        assert_eq!(compatibility_score(&s, &o, &w()), 3.0);
    }

    #[test]
    fn location_substring_matches_either_direction() {
        let mut s = seeker();
        let mut o = offerer();
        s.location = Some("Manchester".to_string());
        o.location = Some("Manchester City Centre".to_string());
        assert_eq!(compatibility_score(&s, &o, &w()), 3.0);

        std::mem::swap(&mut s.location, &mut o.location);
        assert_eq!(compatibility_score(&s, &o, &w()), 3.0);
    }

    #[test]
    fn budget_tiers_are_mutually_exclusive() {
        let mut s = seeker();
        let mut o = offerer();
        set_seeking(&mut s, &[], Some(800.0));
        set_offering(&mut o, Some(750.0), None, None);
        // Affordable outright: +2, and never the stretch +1 on top.
        assert_eq!(compatibility_score(&s, &o, &w()), 2.0);

        set_offering(&mut o, Some(900.0), None, None);
        // 800 * 1.2 = 960 >= 900, stretch tier only.
        assert_eq!(compatibility_score(&s, &o, &w()), 1.0);

        set_offering(&mut o, Some(1000.0), None, None);
        assert_eq!(compatibility_score(&s, &o, &w()), 0.0);
    }

    #[test]
    fn missing_budget_or_rent_skips_the_rule() {
        let mut s = seeker();
        let mut o = offerer();
        set_seeking(&mut s, &[], Some(800.0));
        assert_eq!(compatibility_score(&s, &o, &w()), 0.0);

        set_seeking(&mut s, &[], None);
        set_offering(&mut o, Some(500.0), None, None);
        assert_eq!(compatibility_score(&s, &o, &w()), 0.0);
    }

    #[test]
    fn room_size_presence_is_a_flat_bonus() {
        let s = seeker();
        let mut o = offerer();
        set_offering(&mut o, None, Some("double"), None);
        assert_eq!(compatibility_score(&s, &o, &w()), 0.5);

        set_offering(&mut o, None, Some("   "), None);
        assert_eq!(compatibility_score(&s, &o, &w()), 0.0);
    }

    #[test]
    fn smoking_and_pet_conflicts_penalize() {
        let mut s = seeker();
        let mut o = offerer();
        set_seeking(&mut s, &["Non-Smoker", "Pet-Friendly"], None);
        set_offering(&mut o, None, None, Some("Smoker household, no pets"));
        assert_eq!(compatibility_score(&s, &o, &w()), -3.0);
    }

    #[test]
    fn pets_allowed_bonus_only_without_the_preference() {
        let mut s = seeker();
        let mut o = offerer();
        set_offering(&mut o, None, None, Some("pets allowed"));
        assert_eq!(compatibility_score(&s, &o, &w()), 0.5);

        set_seeking(&mut s, &["pet-friendly"], None);
        assert_eq!(compatibility_score(&s, &o, &w()), 0.0);
    }

    #[test]
    fn quiet_and_social_alignment() {
        let mut s = seeker();
        let mut o = offerer();
        set_seeking(&mut s, &["quiet"], None);
        set_offering(&mut o, None, None, Some("Quiet hours after 10pm"));
        assert_eq!(compatibility_score(&s, &o, &w()), 1.0);

        set_seeking(&mut s, &["social"], None);
        assert_eq!(compatibility_score(&s, &o, &w()), 0.5);

        set_offering(&mut o, None, None, Some("no parties"));
        assert_eq!(compatibility_score(&s, &o, &w()), 0.0);
    }

    #[test]
    fn social_rule_needs_house_rules_present() {
        let mut s = seeker();
        let o = offerer();
        set_seeking(&mut s, &["social"], None);
        assert_eq!(compatibility_score(&s, &o, &w()), 0.0);
    }

    #[test]
    fn gender_match_and_other_fallback() {
        let mut s = seeker();
        let mut o = offerer();
        s.gender = Some("female".to_string());
        o.gender = Some("female".to_string());
        assert_eq!(compatibility_score(&s, &o, &w()), 1.5);

        o.gender = Some("other".to_string());
        assert_eq!(compatibility_score(&s, &o, &w()), 0.5);

        o.gender = Some("male".to_string());
        assert_eq!(compatibility_score(&s, &o, &w()), 0.0);
    }

    #[test]
    fn age_proximity_tiers() {
        let mut s = seeker();
        let mut o = offerer();
        s.age = Some(25);
        o.age = Some(29);
        assert_eq!(compatibility_score(&s, &o, &w()), 1.5);

        o.age = Some(34);
        assert_eq!(compatibility_score(&s, &o, &w()), 0.5);

        o.age = Some(40);
        assert_eq!(compatibility_score(&s, &o, &w()), 0.0);
    }

    #[test]
    fn offering_requester_mirrors_seeking_rules() {
        let mut s = seeker();
        let mut o = offerer();
        set_seeking(&mut s, &[], Some(800.0));
        set_offering(&mut o, Some(750.0), None, None);
        s.location = Some("Leeds".to_string());
        o.location = Some("Leeds".to_string());
        // Same pair scored from the offering side.
        assert_eq!(
            compatibility_score(&o, &s, &w()),
            compatibility_score(&s, &o, &w())
        );
    }

    #[test]
    fn manchester_scenario_scores_at_least_five() {
        let mut s = seeker();
        let mut o = offerer();
        s.location = Some("Manchester".to_string());
        set_seeking(&mut s, &[], Some(800.0));
        o.location = Some("Manchester City Centre".to_string());
        set_offering(&mut o, Some(750.0), None, None);

        let score = compatibility_score(&s, &o, &w());
        assert!(score >= 5.0, "score was {score}");
        assert!(display_percentage(score, &MatchPolicy::default()) >= 85);
    }

    #[test]
    fn display_percentage_stays_in_bounds() {
        let policy = MatchPolicy::default();
        assert_eq!(display_percentage(-100.0, &policy), 50);
        assert_eq!(display_percentage(-3.0, &policy), 61);
        assert_eq!(display_percentage(0.0, &policy), 70);
        assert_eq!(display_percentage(5.0, &policy), 85);
        assert_eq!(display_percentage(100.0, &policy), 95);
    }
}
