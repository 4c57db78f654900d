use axum::extract::State;
use axum::{Extension, Json};
use serde_json::json;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::services::matching_service;
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn find_matches_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Envelope>, ApiError> {
    let outcome = matching_service::find_matches(&state.pool, &state.config, &user.id).await?;
    let data = json!({ "matches": outcome.matches });
    if outcome.degraded {
        Ok(Json(Envelope::warning(
            "Showing your matches. Suggested profiles are temporarily unavailable.",
            data,
        )))
    } else {
        Ok(Json(Envelope::success("Matches found.", data)))
    }
}
