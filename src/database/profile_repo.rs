use sqlx::SqlitePool;

use crate::models::RoommateProfileRow;

const PROFILE_COLUMNS: &str = r#"
    user_id,
    name,
    role,
    age,
    gender,
    location,
    bio,
    sleep_schedule,
    cleanliness,
    preferences,
    budget,
    rooms,
    rent,
    room_size,
    house_rules,
    available_from,
    updated_at
"#;

/// Upsert keyed on user_id. Every role-dependent column is written on every
/// call, so switching role clears the other variant's columns in the same
/// statement.
const SQL_UPSERT_PROFILE: &str = r#"
INSERT INTO roommate_profiles (
  user_id, name, role, age, gender, location, bio,
  sleep_schedule, cleanliness, preferences, budget,
  rooms, rent, room_size, house_rules, available_from,
  updated_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, datetime('now'))
ON CONFLICT (user_id) DO UPDATE SET
  name = excluded.name,
  role = excluded.role,
  age = excluded.age,
  gender = excluded.gender,
  location = excluded.location,
  bio = excluded.bio,
  sleep_schedule = excluded.sleep_schedule,
  cleanliness = excluded.cleanliness,
  preferences = excluded.preferences,
  budget = excluded.budget,
  rooms = excluded.rooms,
  rent = excluded.rent,
  room_size = excluded.room_size,
  house_rules = excluded.house_rules,
  available_from = excluded.available_from,
  updated_at = datetime('now')
"#;

pub struct UpsertProfile<'a> {
    pub user_id: &'a str,
    pub name: &'a str,
    pub role: &'a str,
    pub age: Option<i64>,
    pub gender: Option<&'a str>,
    pub location: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub sleep_schedule: Option<&'a str>,
    pub cleanliness: Option<&'a str>,
    pub preferences: Option<&'a str>,
    pub budget: Option<f64>,
    pub rooms: Option<i64>,
    pub rent: Option<f64>,
    pub room_size: Option<&'a str>,
    pub house_rules: Option<&'a str>,
    pub available_from: Option<&'a str>,
}

pub async fn upsert_profile(pool: &SqlitePool, profile: UpsertProfile<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_PROFILE)
        .bind(profile.user_id)
        .bind(profile.name)
        .bind(profile.role)
        .bind(profile.age)
        .bind(profile.gender)
        .bind(profile.location)
        .bind(profile.bio)
        .bind(profile.sleep_schedule)
        .bind(profile.cleanliness)
        .bind(profile.preferences)
        .bind(profile.budget)
        .bind(profile.rooms)
        .bind(profile.rent)
        .bind(profile.room_size)
        .bind(profile.house_rules)
        .bind(profile.available_from)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn load_profile(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Option<RoommateProfileRow>> {
    let sql = format!(
        "SELECT {PROFILE_COLUMNS} FROM roommate_profiles WHERE user_id = ?1 LIMIT 1"
    );
    sqlx::query_as::<_, RoommateProfileRow>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Candidate pool for the match assembler: everyone with the given role,
/// excluding the requester.
pub async fn load_profiles_by_role(
    pool: &SqlitePool,
    role: &str,
    exclude_user_id: &str,
) -> sqlx::Result<Vec<RoommateProfileRow>> {
    let sql = format!(
        "SELECT {PROFILE_COLUMNS} FROM roommate_profiles WHERE role = ?1 AND user_id != ?2"
    );
    sqlx::query_as::<_, RoommateProfileRow>(&sql)
        .bind(role)
        .bind(exclude_user_id)
        .fetch_all(pool)
        .await
}
