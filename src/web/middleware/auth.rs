use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

use crate::database::user_repo;
use crate::response::Envelope;
use crate::state::AppState;

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: String,
    pub username: String,
}

#[derive(Deserialize)]
struct JwtPayload {
    sub: String,
    #[serde(default)]
    name: Option<String>,
}

/// Pull the identity out of the access_token cookie. The token is verified
/// at the ingress; here we only decode the payload.
pub fn user_from_headers(headers: &HeaderMap) -> Option<AuthenticatedUser> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    let token = cookies
        .split("; ")
        .find_map(|c| c.strip_prefix("access_token="))?;

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload_bytes = general_purpose::URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload: JwtPayload = serde_json::from_slice(&payload_bytes).ok()?;

    let username = payload.name.unwrap_or_else(|| payload.sub.clone());
    Some(AuthenticatedUser {
        id: payload.sub,
        username,
    })
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(user) = user_from_headers(request.headers()) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(Envelope::error("Unauthorized - please log in.")),
        )
            .into_response();
    };

    // Keep a local user row so foreign keys and notifications line up.
    if let Err(e) = user_repo::ensure_user(&state.pool, &user.id, &user.username).await {
        tracing::error!(error = %e, "could not ensure local user row");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Envelope::error("An unexpected server error occurred.")),
        )
            .into_response();
    }

    request.extensions_mut().insert(user);
    next.run(request).await
}
