use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde_json::json;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::services::notification_service;
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn list_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Envelope>, ApiError> {
    let notifications = notification_service::list_notifications(&state.pool, &user.id).await?;
    Ok(Json(Envelope::success(
        "Notifications loaded.",
        json!({ "notifications": notifications }),
    )))
}

pub async fn mark_read_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    notification_service::mark_read(&state.pool, &user.id, &id).await?;
    Ok(Json(Envelope::success_empty("Notification marked as read.")))
}
