use sqlx::SqlitePool;

use crate::models::LikedProfileRow;

const SQL_LIKE_EXISTS: &str = r#"
SELECT 1 FROM liked_profiles WHERE user_id = ?1 AND liked_candidate_key = ?2 LIMIT 1
"#;

const SQL_INSERT_LIKE: &str = r#"
INSERT INTO liked_profiles (
  id,
  user_id,
  liked_candidate_key,
  liked_name,
  liked_age,
  liked_gender,
  liked_location,
  liked_budget,
  liked_bio,
  liked_score,
  liked_avatar_url
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
"#;

const SQL_LIST_LIKES: &str = r#"
SELECT
  id,
  user_id,
  liked_candidate_key,
  liked_name,
  liked_age,
  liked_gender,
  liked_location,
  liked_budget,
  liked_bio,
  liked_score,
  liked_avatar_url,
  liked_at
FROM liked_profiles
WHERE user_id = ?1
ORDER BY liked_at DESC
"#;

pub struct NewLikedProfile<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub candidate_key: &'a str,
    pub name: &'a str,
    pub age: Option<i64>,
    pub gender: Option<&'a str>,
    pub location: Option<&'a str>,
    pub budget: Option<f64>,
    pub bio: Option<&'a str>,
    pub score: Option<i64>,
    pub avatar_url: Option<&'a str>,
}

pub async fn like_exists(
    pool: &SqlitePool,
    user_id: &str,
    candidate_key: &str,
) -> sqlx::Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as(SQL_LIKE_EXISTS)
        .bind(user_id)
        .bind(candidate_key)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Takes an executor so it can run inside the like+notification transaction.
pub async fn insert_like(
    executor: impl sqlx::SqliteExecutor<'_>,
    like: NewLikedProfile<'_>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_LIKE)
        .bind(like.id)
        .bind(like.user_id)
        .bind(like.candidate_key)
        .bind(like.name)
        .bind(like.age)
        .bind(like.gender)
        .bind(like.location)
        .bind(like.budget)
        .bind(like.bio)
        .bind(like.score)
        .bind(like.avatar_url)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn list_likes_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<LikedProfileRow>> {
    sqlx::query_as::<_, LikedProfileRow>(SQL_LIST_LIKES)
        .bind(user_id)
        .fetch_all(pool)
        .await
}
