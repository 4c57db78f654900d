use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::forum_repo::{self, NewForumPost};
use crate::error::ApiError;
use crate::models::forum::CATEGORIES;
use crate::response::Envelope;
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub struct ForumPostPayload {
    pub title: String,
    pub content: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct ForumReplyPayload {
    pub content: String,
}

pub async fn submit_post_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<ForumPostPayload>,
) -> Result<Json<Envelope>, ApiError> {
    let title = payload.title.trim();
    let content = payload.content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(ApiError::BadRequest(
            "Title and content are required.".into(),
        ));
    }
    let category = payload.category.trim();
    if !CATEGORIES.contains(&category) {
        return Err(ApiError::BadRequest("Invalid forum category.".into()));
    }

    forum_repo::insert_post(
        &state.pool,
        NewForumPost {
            id: &Uuid::new_v4().to_string(),
            user_id: &user.id,
            title,
            content,
            category,
        },
    )
    .await?;

    Ok(Json(Envelope::success_empty("Your post has been published.")))
}

pub async fn list_posts_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
) -> Result<Json<Envelope>, ApiError> {
    let posts = forum_repo::list_posts(&state.pool).await?;
    Ok(Json(Envelope::success(
        "Forum posts loaded.",
        json!({ "posts": posts }),
    )))
}

pub async fn submit_reply_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    Json(payload): Json<ForumReplyPayload>,
) -> Result<Json<Envelope>, ApiError> {
    let content = payload.content.trim();
    if content.is_empty() {
        return Err(ApiError::BadRequest("Reply content is required.".into()));
    }
    if !forum_repo::post_exists(&state.pool, &post_id).await? {
        return Err(ApiError::NotFound("Forum post not found.".into()));
    }

    forum_repo::insert_reply(
        &state.pool,
        &Uuid::new_v4().to_string(),
        &post_id,
        &user.id,
        content,
    )
    .await?;

    Ok(Json(Envelope::success_empty("Your reply has been posted.")))
}

pub async fn list_replies_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    if !forum_repo::post_exists(&state.pool, &post_id).await? {
        return Err(ApiError::NotFound("Forum post not found.".into()));
    }
    let replies = forum_repo::list_replies(&state.pool, &post_id).await?;
    Ok(Json(Envelope::success(
        "Replies loaded.",
        json!({ "replies": replies }),
    )))
}
