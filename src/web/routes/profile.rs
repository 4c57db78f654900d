use axum::extract::State;
use axum::{Extension, Json};
use serde_json::json;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::services::profile_service::{self, ProfilePayload};
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn get_profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Envelope>, ApiError> {
    match profile_service::get_profile(&state.pool, &user.id).await? {
        Some(profile) => Ok(Json(Envelope::success(
            "Profile loaded.",
            json!({ "profile": profile }),
        ))),
        None => Ok(Json(Envelope::info(
            "You have not created a roommate profile yet.",
        ))),
    }
}

pub async fn save_profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<Envelope>, ApiError> {
    profile_service::save_profile(&state.pool, &user.id, &payload).await?;
    Ok(Json(Envelope::success_empty(
        "Your roommate profile has been saved.",
    )))
}
