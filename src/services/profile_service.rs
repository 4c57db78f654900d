use serde::Deserialize;
use sqlx::SqlitePool;

use crate::database::profile_repo::{self, UpsertProfile};
use crate::error::ApiError;
use crate::models::roommate_profile::join_preferences;
use crate::models::{RoleDetails, RoommateProfile};

pub const GENDERS: &[&str] = &["male", "female", "other"];
const MIN_AGE: i64 = 18;
const MAX_AGE: i64 = 99;
const MIN_BUDGET: f64 = 100.0;
const MAX_BUDGET: f64 = 5000.0;

#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[serde(flatten)]
    pub details: RoleDetails,
}

pub async fn save_profile(
    pool: &SqlitePool,
    user_id: &str,
    payload: &ProfilePayload,
) -> Result<(), ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest(
            "Name is required for your profile.".into(),
        ));
    }
    if let Some(age) = payload.age {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ApiError::BadRequest(format!(
                "Invalid age provided. Must be a number between {MIN_AGE} and {MAX_AGE}."
            )));
        }
    }
    if let Some(gender) = payload.gender.as_deref() {
        if !GENDERS.contains(&gender) {
            return Err(ApiError::BadRequest(
                "Invalid gender. Use male, female or other.".into(),
            ));
        }
    }

    let role = payload.details.role();
    let mut preferences_joined = None;
    let (sleep_schedule, cleanliness, budget) = match &payload.details {
        RoleDetails::Seeking {
            sleep_schedule,
            cleanliness,
            preferences,
            budget,
        } => {
            if let Some(budget) = budget {
                if !(MIN_BUDGET..=MAX_BUDGET).contains(budget) {
                    return Err(ApiError::BadRequest(format!(
                        "Invalid budget provided. Must be between £{MIN_BUDGET:.0} and £{MAX_BUDGET:.0}."
                    )));
                }
            }
            let joined = join_preferences(preferences);
            preferences_joined = (!joined.is_empty()).then_some(joined);
            (sleep_schedule.as_deref(), cleanliness.as_deref(), *budget)
        }
        RoleDetails::Offering { .. } => (None, None, None),
    };
    let (rooms, rent, room_size, house_rules, available_from) = match &payload.details {
        RoleDetails::Offering {
            rooms,
            rent,
            room_size,
            house_rules,
            available_from,
        } => {
            if let Some(rent) = rent {
                if *rent <= 0.0 {
                    return Err(ApiError::BadRequest(
                        "Invalid rent provided. Must be a positive amount.".into(),
                    ));
                }
            }
            if let Some(rooms) = rooms {
                if *rooms <= 0 {
                    return Err(ApiError::BadRequest(
                        "Invalid room count provided. Must be a positive number.".into(),
                    ));
                }
            }
            (
                *rooms,
                *rent,
                room_size.as_deref(),
                house_rules.as_deref(),
                available_from.as_deref(),
            )
        }
        RoleDetails::Seeking { .. } => (None, None, None, None, None),
    };

    profile_repo::upsert_profile(
        pool,
        UpsertProfile {
            user_id,
            name,
            role: role.as_str(),
            age: payload.age,
            gender: payload.gender.as_deref(),
            location: payload.location.as_deref(),
            bio: payload.bio.as_deref(),
            sleep_schedule,
            cleanliness,
            preferences: preferences_joined.as_deref(),
            budget,
            rooms,
            rent,
            room_size,
            house_rules,
            available_from,
        },
    )
    .await?;
    Ok(())
}

pub async fn get_profile(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Option<RoommateProfile>, ApiError> {
    Ok(profile_repo::load_profile(pool, user_id)
        .await?
        .map(|row| row.into_profile()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::{memory_pool, seed_user};

    fn seeking_payload() -> ProfilePayload {
        ProfilePayload {
            name: "Asha".to_string(),
            age: Some(25),
            gender: Some("female".to_string()),
            location: Some("Leeds".to_string()),
            bio: Some("Final-year student.".to_string()),
            details: RoleDetails::Seeking {
                sleep_schedule: Some("night_owl".to_string()),
                cleanliness: Some("very_tidy".to_string()),
                preferences: vec!["quiet".to_string(), "non-smoker".to_string()],
                budget: Some(800.0),
            },
        }
    }

    #[tokio::test]
    async fn upsert_round_trips_a_seeking_profile() {
        let pool = memory_pool().await;
        seed_user(&pool, "u1", "asha").await;
        save_profile(&pool, "u1", &seeking_payload()).await.unwrap();

        let profile = get_profile(&pool, "u1").await.unwrap().unwrap();
        assert_eq!(profile.name, "Asha");
        match profile.details {
            RoleDetails::Seeking {
                preferences,
                budget,
                ..
            } => {
                assert_eq!(preferences, vec!["quiet", "non-smoker"]);
                assert_eq!(budget, Some(800.0));
            }
            RoleDetails::Offering { .. } => panic!("expected seeking profile"),
        }
    }

    #[tokio::test]
    async fn switching_role_clears_the_other_variants_fields() {
        let pool = memory_pool().await;
        seed_user(&pool, "u1", "asha").await;
        save_profile(&pool, "u1", &seeking_payload()).await.unwrap();

        let offering = ProfilePayload {
            name: "Asha".to_string(),
            age: Some(25),
            gender: Some("female".to_string()),
            location: Some("Leeds".to_string()),
            bio: None,
            details: RoleDetails::Offering {
                rooms: Some(2),
                rent: Some(650.0),
                room_size: Some("double".to_string()),
                house_rules: Some("no pets".to_string()),
                available_from: Some("2026-09-01".to_string()),
            },
        };
        save_profile(&pool, "u1", &offering).await.unwrap();

        let profile = get_profile(&pool, "u1").await.unwrap().unwrap();
        match profile.details {
            RoleDetails::Offering { rent, .. } => assert_eq!(rent, Some(650.0)),
            RoleDetails::Seeking { .. } => panic!("expected offering profile"),
        }

        // The seeking columns must be gone from storage, not just hidden.
        let row = crate::database::profile_repo::load_profile(&pool, "u1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.budget, None);
        assert_eq!(row.preferences, None);
        assert_eq!(row.sleep_schedule, None);
    }

    #[tokio::test]
    async fn validation_rejects_bad_input() {
        let pool = memory_pool().await;
        seed_user(&pool, "u1", "asha").await;

        let mut payload = seeking_payload();
        payload.name = "  ".to_string();
        assert!(matches!(
            save_profile(&pool, "u1", &payload).await.unwrap_err(),
            ApiError::BadRequest(_)
        ));

        let mut payload = seeking_payload();
        payload.age = Some(17);
        assert!(matches!(
            save_profile(&pool, "u1", &payload).await.unwrap_err(),
            ApiError::BadRequest(_)
        ));

        let mut payload = seeking_payload();
        payload.gender = Some("robot".to_string());
        assert!(matches!(
            save_profile(&pool, "u1", &payload).await.unwrap_err(),
            ApiError::BadRequest(_)
        ));

        let mut payload = seeking_payload();
        payload.details = RoleDetails::Seeking {
            sleep_schedule: None,
            cleanliness: None,
            preferences: Vec::new(),
            budget: Some(50.0),
        };
        assert!(matches!(
            save_profile(&pool, "u1", &payload).await.unwrap_err(),
            ApiError::BadRequest(_)
        ));
    }
}
