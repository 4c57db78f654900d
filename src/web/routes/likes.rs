use axum::extract::State;
use axum::{Extension, Json};
use serde_json::json;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::services::like_service::{self, LikeOutcome, LikeRequest};
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn like_profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<LikeRequest>,
) -> Result<Json<Envelope>, ApiError> {
    match like_service::record_like(&state.pool, &user.id, &request).await? {
        LikeOutcome::Saved => Ok(Json(Envelope::success_empty("Profile liked."))),
        LikeOutcome::AlreadyLiked => Ok(Json(Envelope::info(
            "You have already liked this profile.",
        ))),
    }
}

pub async fn list_likes_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Envelope>, ApiError> {
    let likes = like_service::list_likes(&state.pool, &user.id).await?;
    Ok(Json(Envelope::success(
        "Liked profiles loaded.",
        json!({ "liked_profiles": likes }),
    )))
}
