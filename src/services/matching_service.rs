//! Match assembly: score the real candidate pool, keep the best, top up with
//! synthetic profiles from the generative provider while the population is
//! small, and shuffle the final ordering.

use rand::seq::SliceRandom;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::warn;
use uuid::Uuid;

use crate::config::Config;
use crate::database::profile_repo;
use crate::error::{ApiError, UpstreamError};
use crate::models::{CandidateKey, CandidateMatch, Role, RoleDetails, RoommateProfile};
use crate::services::ai_service::{self, CompletionOptions, Message};
use crate::services::scoring::{self, ScoringWeights};

#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<CandidateMatch>,
    /// Set when the synthetic top-up failed but real matches were found.
    pub degraded: bool,
}

pub async fn find_matches(
    pool: &SqlitePool,
    config: &Config,
    user_id: &str,
) -> Result<MatchOutcome, ApiError> {
    let requester = profile_repo::load_profile(pool, user_id)
        .await?
        .map(|row| row.into_profile())
        .ok_or_else(|| {
            ApiError::NotFound("Please create your roommate profile first to find matches.".into())
        })?;

    let policy = &config.match_policy;
    let weights = ScoringWeights::default();
    let candidate_role = requester.role().opposite();

    let rows =
        profile_repo::load_profiles_by_role(pool, candidate_role.as_str(), user_id).await?;
    let population = rows.len();

    let mut matches: Vec<CandidateMatch> = rows
        .into_iter()
        .map(|row| {
            let profile = row.into_profile();
            let score = scoring::compatibility_score(&requester, &profile, &weights);
            real_candidate(profile, score, config)
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(policy.target_count);

    let mut degraded = false;
    let shortfall = policy.target_count.saturating_sub(matches.len());
    if shortfall > 0 && population < policy.synthetic_population_threshold {
        match synthetic_fill(config, &requester, candidate_role, shortfall).await {
            Ok(fill) => matches.extend(fill),
            Err(e) if matches.is_empty() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "synthetic top-up failed, returning real matches only");
                degraded = true;
            }
        }
    }

    matches.shuffle(&mut rand::thread_rng());

    Ok(MatchOutcome { matches, degraded })
}

fn real_candidate(profile: RoommateProfile, score: f64, config: &Config) -> CandidateMatch {
    let initial = profile
        .name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "U".to_string());
    let amount = profile.budget().or(profile.rent());
    CandidateMatch {
        key: CandidateKey::Real(profile.user_id),
        role: profile.details.role(),
        name: profile.name,
        age: profile.age,
        gender: profile.gender,
        location: profile.location,
        amount,
        bio: profile.bio,
        score,
        compatibility_score: scoring::display_percentage(score, &config.match_policy),
        avatar_url: format!("https://placehold.co/160x160/cccccc/ffffff?text={initial}"),
        synthetic: false,
    }
}

async fn synthetic_fill(
    config: &Config,
    requester: &RoommateProfile,
    role: Role,
    count: usize,
) -> Result<Vec<CandidateMatch>, UpstreamError> {
    let prompt = fill_prompt(requester, role, count);
    let opts = CompletionOptions {
        temperature: 0.9,
        json: true,
        ..Default::default()
    };
    let value = ai_service::complete_json(config, &[Message::user(prompt)], &opts).await?;

    let entries = extract_profile_array(&value).ok_or_else(|| UpstreamError::Unreadable {
        service: "AI service",
        detail: "no profile array in response".to_string(),
    })?;

    Ok(entries
        .iter()
        .filter_map(|entry| synthetic_candidate(entry, role, config))
        .take(count)
        .collect())
}

fn fill_prompt(requester: &RoommateProfile, role: Role, count: usize) -> String {
    let looking_for = match role {
        Role::Offering => "people offering a room to let",
        Role::Seeking => "people looking for a room",
    };
    let mut wants = Vec::new();
    if let Some(location) = requester.location.as_deref() {
        wants.push(format!("located around {location}"));
    }
    match &requester.details {
        RoleDetails::Seeking {
            budget,
            preferences,
            ..
        } => {
            if let Some(budget) = budget {
                wants.push(format!("monthly rent near £{budget:.0}"));
            }
            if !preferences.is_empty() {
                wants.push(format!("lifestyle: {}", preferences.join(", ")));
            }
        }
        RoleDetails::Offering { rent, .. } => {
            if let Some(rent) = rent {
                wants.push(format!("budget near £{rent:.0} per month"));
            }
        }
    }
    let context = if wants.is_empty() {
        "no particular constraints".to_string()
    } else {
        wants.join("; ")
    };

    format!(
        "Generate {count} fictional, diverse UK roommate profiles for {looking_for} \
         ({context}). Respond with ONLY a JSON object of the form \
         {{\"profiles\": [...]}} where each entry has exactly these keys: \
         \"name\" (string), \"age\" (integer 18-40), \"gender\" \
         (\"male\", \"female\" or \"other\"), \"location\" (UK town or city), \
         \"amount\" (monthly rent or budget in GBP, integer), \"bio\" (2-3 \
         sentences), \"compatibility_score\" (integer 70-95). No markdown, no \
         commentary."
    )
}

/// Accept either a bare array or the first array-valued field of an object;
/// providers are inconsistent about the outer shape even in json mode.
fn extract_profile_array(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => map.values().find_map(|v| match v {
            Value::Array(entries) => Some(entries),
            _ => None,
        }),
        _ => None,
    }
}

fn synthetic_candidate(entry: &Value, role: Role, config: &Config) -> Option<CandidateMatch> {
    let name = entry.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let policy = &config.match_policy;
    let compatibility = entry
        .get("compatibility_score")
        .and_then(value_as_i64)
        .unwrap_or(policy.display_base as i64)
        .clamp(policy.display_floor, policy.display_cap);

    let token = Uuid::new_v4().to_string();
    let avatar_url = format!("https://picsum.photos/seed/{token}/160/160");
    Some(CandidateMatch {
        key: CandidateKey::Synthetic(token),
        role,
        name: name.to_string(),
        age: entry.get("age").and_then(value_as_i64),
        gender: entry
            .get("gender")
            .and_then(Value::as_str)
            .map(String::from),
        location: entry
            .get("location")
            .and_then(Value::as_str)
            .map(String::from),
        amount: entry
            .get("amount")
            .or_else(|| entry.get("budget"))
            .and_then(value_as_f64),
        bio: entry.get("bio").and_then(Value::as_str).map(String::from),
        score: 0.0,
        compatibility_score: compatibility,
        avatar_url,
        synthetic: true,
    })
}

fn value_as_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn value_as_f64(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchPolicy;
    use crate::database::profile_repo::{upsert_profile, UpsertProfile};
    use crate::database::testing::{memory_pool, seed_user};
    use serde_json::json;

    fn test_config() -> Config {
        Config {
            database_url: String::new(),
            host: String::new(),
            port: 0,
            openai_api_key: None,
            openai_api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            openai_model: "test".to_string(),
            opencage_api_key: None,
            opencage_api_url: String::new(),
            match_policy: MatchPolicy::default(),
        }
    }

    async fn add_seeking(
        pool: &sqlx::SqlitePool,
        user_id: &str,
        name: &str,
        location: &str,
        budget: f64,
    ) {
        seed_user(pool, user_id, name).await;
        upsert_profile(
            pool,
            UpsertProfile {
                user_id,
                name,
                role: "seeking",
                age: Some(25),
                gender: Some("female"),
                location: Some(location),
                bio: None,
                sleep_schedule: None,
                cleanliness: None,
                preferences: None,
                budget: Some(budget),
                rooms: None,
                rent: None,
                room_size: None,
                house_rules: None,
                available_from: None,
            },
        )
        .await
        .unwrap();
    }

    async fn add_offering(
        pool: &sqlx::SqlitePool,
        user_id: &str,
        name: &str,
        location: &str,
        rent: f64,
    ) {
        seed_user(pool, user_id, name).await;
        upsert_profile(
            pool,
            UpsertProfile {
                user_id,
                name,
                role: "offering",
                age: Some(27),
                gender: Some("female"),
                location: Some(location),
                bio: None,
                sleep_schedule: None,
                cleanliness: None,
                preferences: None,
                budget: None,
                rooms: Some(1),
                rent: Some(rent),
                room_size: Some("double"),
                house_rules: None,
                available_from: None,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn missing_profile_is_a_not_found() {
        let pool = memory_pool().await;
        seed_user(&pool, "u1", "asha").await;
        let err = find_matches(&pool, &test_config(), "u1").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn population_at_threshold_skips_synthetic_top_up() {
        let pool = memory_pool().await;
        add_seeking(&pool, "u1", "Asha", "Leeds", 800.0).await;
        add_offering(&pool, "u2", "Ben", "Leeds", 700.0).await;

        let mut config = test_config();
        config.match_policy.synthetic_population_threshold = 1;
        // An API key is configured; the gate alone must prevent the call.
        config.openai_api_key = Some("test-key".to_string());

        let outcome = find_matches(&pool, &config, "u1").await.unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert!(!outcome.degraded);
        assert!(outcome.matches.iter().all(|m| !m.synthetic));
    }

    #[tokio::test]
    async fn generator_failure_degrades_when_real_matches_exist() {
        let pool = memory_pool().await;
        add_seeking(&pool, "u1", "Asha", "Leeds", 800.0).await;
        add_offering(&pool, "u2", "Ben", "Leeds", 700.0).await;

        // Key present but the endpoint is unreachable.
        let mut config = test_config();
        config.openai_api_key = Some("test-key".to_string());

        let outcome = find_matches(&pool, &config, "u1").await.unwrap();
        assert!(outcome.degraded);
        assert_eq!(outcome.matches.len(), 1);
        assert!(!outcome.matches[0].synthetic);
    }

    #[tokio::test]
    async fn generator_failure_with_zero_real_matches_fails() {
        let pool = memory_pool().await;
        add_seeking(&pool, "u1", "Asha", "Leeds", 800.0).await;

        let mut config = test_config();
        config.openai_api_key = Some("test-key".to_string());

        let err = find_matches(&pool, &config, "u1").await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream(_)));
    }

    #[tokio::test]
    async fn keeps_the_best_scored_candidates_up_to_target() {
        let pool = memory_pool().await;
        add_seeking(&pool, "u1", "Asha", "Leeds", 800.0).await;
        for i in 0..5 {
            let uid = format!("o{i}");
            // Only o0 and o1 are in Leeds; the rest score lower.
            let location = if i < 2 { "Leeds" } else { "Glasgow" };
            add_offering(&pool, &uid, "Host", location, 700.0).await;
        }

        let mut config = test_config();
        config.match_policy.target_count = 2;
        config.match_policy.synthetic_population_threshold = 0;

        let outcome = find_matches(&pool, &config, "u1").await.unwrap();
        assert_eq!(outcome.matches.len(), 2);
        let mut kept: Vec<&str> = outcome
            .matches
            .iter()
            .filter_map(|m| m.key.real_user_id())
            .collect();
        kept.sort();
        assert_eq!(kept, vec!["o0", "o1"]);
    }

    #[tokio::test]
    async fn requester_is_excluded_from_their_own_candidates() {
        let pool = memory_pool().await;
        add_offering(&pool, "u1", "Asha", "Leeds", 700.0).await;
        add_seeking(&pool, "u2", "Ben", "Leeds", 800.0).await;

        let mut config = test_config();
        config.match_policy.synthetic_population_threshold = 0;

        let outcome = find_matches(&pool, &config, "u1").await.unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].key.real_user_id(), Some("u2"));
    }

    #[test]
    fn profile_array_extraction_accepts_both_shapes() {
        let bare = json!([{ "name": "A" }]);
        assert_eq!(extract_profile_array(&bare).unwrap().len(), 1);

        let wrapped = json!({ "profiles": [{ "name": "A" }, { "name": "B" }] });
        assert_eq!(extract_profile_array(&wrapped).unwrap().len(), 2);

        assert!(extract_profile_array(&json!({ "profiles": "oops" })).is_none());
    }

    #[test]
    fn synthetic_candidates_get_clamped_scores_and_synthetic_keys() {
        let config = test_config();
        let entry = json!({
            "name": "Priya",
            "age": "26",
            "gender": "female",
            "location": "Bristol",
            "amount": 650,
            "bio": "Keen climber.",
            "compatibility_score": 400
        });
        let candidate = synthetic_candidate(&entry, Role::Offering, &config).unwrap();
        assert!(candidate.synthetic);
        assert!(candidate.key.is_synthetic());
        assert_eq!(candidate.age, Some(26));
        assert_eq!(candidate.compatibility_score, 95);

        assert!(synthetic_candidate(&json!({ "age": 20 }), Role::Offering, &config).is_none());
    }
}
