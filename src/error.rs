use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::response::Envelope;

/// Failures of an outbound call to one of the AI/geocoding providers.
/// "Unavailable" and "unreadable" are kept apart so the caller-facing
/// message can say which one happened.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{service} is currently unavailable: API key not configured")]
    NotConfigured { service: &'static str },
    #[error("failed to connect to {service}")]
    Unreachable {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} returned status {status}")]
    BadStatus {
        service: &'static str,
        status: StatusCode,
    },
    #[error("{service} returned an unreadable response")]
    Unreadable {
        service: &'static str,
        detail: String,
    },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(UpstreamError::NotConfigured { .. })
            | ApiError::Upstream(UpstreamError::Unreachable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            // Internal detail stays in the logs.
            ApiError::Database(_) => "An unexpected server error occurred.".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(e) => error!(error = %e, "database failure"),
            ApiError::Upstream(e) => error!(error = %e, "upstream failure"),
            _ => {}
        }
        let status = self.status_code();
        (status, Json(Envelope::error(self.public_message()))).into_response()
    }
}
