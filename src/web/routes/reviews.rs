use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::review_repo::{self, NewReview};
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub struct ReviewPayload {
    pub landlord_name: String,
    pub property_address: String,
    pub rating: i64,
    pub comments: String,
}

pub async fn submit_review_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<ReviewPayload>,
) -> Result<Json<Envelope>, ApiError> {
    let landlord_name = payload.landlord_name.trim();
    let property_address = payload.property_address.trim();
    let comments = payload.comments.trim();
    if landlord_name.is_empty() || property_address.is_empty() || comments.is_empty() {
        return Err(ApiError::BadRequest(
            "Landlord name, property address and comments are required.".into(),
        ));
    }
    if !(1..=5).contains(&payload.rating) {
        return Err(ApiError::BadRequest(
            "Invalid rating. Must be a number between 1 and 5.".into(),
        ));
    }

    review_repo::insert_review(
        &state.pool,
        NewReview {
            id: &Uuid::new_v4().to_string(),
            user_id: &user.id,
            landlord_name,
            property_address,
            rating: payload.rating,
            comments,
        },
    )
    .await?;

    Ok(Json(Envelope::success_empty(
        "Your review has been submitted.",
    )))
}

pub async fn list_reviews_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
) -> Result<Json<Envelope>, ApiError> {
    let reviews = review_repo::list_reviews(&state.pool).await?;
    Ok(Json(Envelope::success(
        "Reviews loaded.",
        json!({ "reviews": reviews }),
    )))
}
