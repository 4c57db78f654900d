use axum::http::HeaderMap;
use axum::Json;
use serde_json::json;

use crate::response::Envelope;
use crate::web::middleware::auth::user_from_headers;

pub async fn check_auth_handler(headers: HeaderMap) -> Json<Envelope> {
    match user_from_headers(&headers) {
        Some(user) => Json(Envelope::success(
            "Authenticated.",
            json!({
                "authenticated": true,
                "uid": user.id,
                "username": user.username,
            }),
        )),
        None => Json(Envelope::success(
            "Not authenticated.",
            json!({ "authenticated": false }),
        )),
    }
}
