use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Extension, Json};

use crate::database::user_repo;
use crate::error::ApiError;
use crate::response::Envelope;
use crate::services::rent_service::{self, DeclarationCheckRequest, RentEstimateRequest};
use crate::state::AppState;
use crate::web::middleware::auth::{user_from_headers, AuthenticatedUser};

/// Public endpoint; estimates are only persisted for signed-in users.
pub async fn predict_rent_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RentEstimateRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let user = user_from_headers(&headers);
    if let Some(user) = &user {
        // This route sits outside the auth middleware, so the local row may
        // not exist yet. Best-effort; the estimate never depends on it.
        if let Err(e) = user_repo::ensure_user(&state.pool, &user.id, &user.username).await {
            tracing::warn!(error = %e, "could not ensure local user row");
        }
    }
    let data = rent_service::predict_rent(
        &state.pool,
        &state.config,
        user.as_ref().map(|u| u.id.as_str()),
        &request,
    )
    .await?;
    Ok(Json(Envelope::success("Rent estimate generated.", data)))
}

pub async fn check_declaration_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<DeclarationCheckRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let data =
        rent_service::check_rent_declaration(&state.pool, &state.config, &user.id, &request)
            .await?;
    Ok(Json(Envelope::success("Declaration check complete.", data)))
}
