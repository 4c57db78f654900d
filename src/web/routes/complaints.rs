use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::complaint_repo::{self, NewComplaint};
use crate::error::ApiError;
use crate::models::complaint::ISSUE_TYPES;
use crate::response::Envelope;
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub struct ComplaintPayload {
    pub issue_type: String,
    pub property_address: String,
    pub landlord_name: Option<String>,
    pub description: String,
}

pub async fn submit_complaint_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<ComplaintPayload>,
) -> Result<Json<Envelope>, ApiError> {
    let issue_type = payload.issue_type.trim();
    if !ISSUE_TYPES.contains(&issue_type) {
        return Err(ApiError::BadRequest("Invalid issue type.".into()));
    }
    let property_address = payload.property_address.trim();
    let description = payload.description.trim();
    if property_address.is_empty() || description.is_empty() {
        return Err(ApiError::BadRequest(
            "Property address and description are required.".into(),
        ));
    }

    complaint_repo::insert_complaint(
        &state.pool,
        NewComplaint {
            id: &Uuid::new_v4().to_string(),
            user_id: &user.id,
            issue_type,
            property_address,
            landlord_name: payload
                .landlord_name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty()),
            description,
        },
    )
    .await?;

    Ok(Json(Envelope::success_empty(
        "Your complaint has been submitted.",
    )))
}

pub async fn list_complaints_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Envelope>, ApiError> {
    let complaints = complaint_repo::list_complaints_for_user(&state.pool, &user.id).await?;
    Ok(Json(Envelope::success(
        "Complaints loaded.",
        json!({ "complaints": complaints }),
    )))
}
