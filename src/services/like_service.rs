//! Liked-profile recording. Idempotent per (requester, candidate key); a
//! like of a real user also leaves that user a notification, written in the
//! same transaction so the two can never diverge.

use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::warn;
use uuid::Uuid;

use crate::database::{liked_profile_repo, notification_repo, profile_repo, user_repo};
use crate::error::ApiError;
use crate::models::{CandidateKey, LikedProfileRow};

pub const NOTIFICATION_KIND_PROFILE_LIKED: &str = "profile_liked";

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub uid: String,
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub budget: Option<f64>,
    pub bio: Option<String>,
    pub compatibility_score: Option<i64>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LikeOutcome {
    Saved,
    AlreadyLiked,
}

pub async fn record_like(
    pool: &SqlitePool,
    requester_id: &str,
    request: &LikeRequest,
) -> Result<LikeOutcome, ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Liked profile name is required.".into()));
    }
    let raw_key = request.uid.trim();
    if raw_key.is_empty() {
        return Err(ApiError::BadRequest("Liked profile uid is required.".into()));
    }
    let key = CandidateKey::parse(raw_key);
    let wire_key = key.as_wire();

    if liked_profile_repo::like_exists(pool, requester_id, &wire_key).await? {
        return Ok(LikeOutcome::AlreadyLiked);
    }

    // Resolved before the transaction starts so no second connection is
    // needed while it is open.
    let liker_name = match key.real_user_id() {
        Some(target) if target != requester_id => Some(liker_display_name(pool, requester_id).await),
        _ => None,
    };

    let like_id = Uuid::new_v4().to_string();
    let mut tx = pool.begin().await?;

    let insert = liked_profile_repo::insert_like(
        &mut *tx,
        liked_profile_repo::NewLikedProfile {
            id: &like_id,
            user_id: requester_id,
            candidate_key: &wire_key,
            name,
            age: request.age,
            gender: request.gender.as_deref(),
            location: request.location.as_deref(),
            budget: request.budget,
            bio: request.bio.as_deref(),
            score: request.compatibility_score,
            avatar_url: request.avatar_url.as_deref(),
        },
    )
    .await;

    if let Err(e) = insert {
        // Lost a race with a concurrent like of the same pair.
        if e.as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            return Ok(LikeOutcome::AlreadyLiked);
        }
        return Err(e.into());
    }

    if let Some(target_user) = key.real_user_id() {
        if target_user != requester_id {
            // Best-effort resolution: a key that doesn't resolve to a user
            // (stale or synthetic-shaped) just skips the notification.
            match user_repo::user_exists(&mut *tx, target_user).await {
                Ok(true) => {
                    let liker = liker_name.as_deref().unwrap_or("Someone");
                    notification_repo::insert_notification(
                        &mut *tx,
                        &Uuid::new_v4().to_string(),
                        target_user,
                        NOTIFICATION_KIND_PROFILE_LIKED,
                        &format!("{liker} liked your roommate profile."),
                    )
                    .await?;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "liked-user lookup failed, skipping notification");
                }
            }
        }
    }

    tx.commit().await?;
    Ok(LikeOutcome::Saved)
}

async fn liker_display_name(pool: &SqlitePool, user_id: &str) -> String {
    match profile_repo::load_profile(pool, user_id).await {
        Ok(Some(row)) => row.name,
        _ => "Someone".to_string(),
    }
}

pub async fn list_likes(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<LikedProfileRow>, ApiError> {
    Ok(liked_profile_repo::list_likes_for_user(pool, user_id).await?)
}
