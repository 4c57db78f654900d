use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::services::contract_service;
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub struct AnalyzeContractPayload {
    pub contract_text: String,
}

#[derive(Debug, Deserialize)]
pub struct RefineTextPayload {
    pub text: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ForumIdeaPayload {
    pub topic: Option<String>,
}

pub async fn analyze_contract_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<AnalyzeContractPayload>,
) -> Result<Json<Envelope>, ApiError> {
    let analysis = contract_service::analyze_contract(
        &state.pool,
        &state.config,
        &user.id,
        &payload.contract_text,
    )
    .await?;
    Ok(Json(Envelope::success(
        "Contract analysed.",
        json!({ "analysis": analysis }),
    )))
}

pub async fn refine_text_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
    Json(payload): Json<RefineTextPayload>,
) -> Result<Json<Envelope>, ApiError> {
    let refined = contract_service::refine_text(&state.config, &payload.text).await?;
    Ok(Json(Envelope::success(
        "Text refined.",
        json!({ "refined_text": refined }),
    )))
}

pub async fn forum_idea_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
    payload: Option<Json<ForumIdeaPayload>>,
) -> Result<Json<Envelope>, ApiError> {
    let topic = payload.as_ref().and_then(|p| p.topic.as_deref());
    let idea = contract_service::generate_forum_idea(&state.config, topic).await?;
    Ok(Json(Envelope::success(
        "Post idea generated.",
        json!({ "idea": idea }),
    )))
}
