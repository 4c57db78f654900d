use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::services::chat_service;
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub struct SendMessagePayload {
    pub receiver_uid: String,
    pub message: String,
}

pub async fn send_message_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<SendMessagePayload>,
) -> Result<Json<Envelope>, ApiError> {
    let message =
        chat_service::send_message(&state.pool, &user.id, &payload.receiver_uid, &payload.message)
            .await?;
    Ok(Json(Envelope::success(
        "Message sent.",
        json!({ "message": message }),
    )))
}

pub async fn conversation_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(peer_uid): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    let messages = chat_service::fetch_conversation(&state.pool, &user.id, &peer_uid).await?;
    Ok(Json(Envelope::success(
        "Conversation loaded.",
        json!({ "messages": messages }),
    )))
}
