use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::services::geocode_service;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestionPayload {
    pub query: String,
}

pub async fn suggestions_handler(
    State(state): State<AppState>,
    Json(payload): Json<SuggestionPayload>,
) -> Result<Json<Envelope>, ApiError> {
    let suggestions = geocode_service::address_suggestions(&state.config, &payload.query).await?;
    Ok(Json(Envelope::success(
        "Suggestions loaded.",
        json!({ "suggestions": suggestions }),
    )))
}
