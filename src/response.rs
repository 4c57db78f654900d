use serde::Serialize;
use serde_json::Value;

/// The `{status, message, data}` envelope every endpoint speaks.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: None,
        }
    }

    /// Informational, e.g. "already liked". Not an error.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            status: "info",
            message: message.into(),
            data: None,
        }
    }

    /// Partial success, e.g. a match response missing its synthetic top-up.
    pub fn warning(message: impl Into<String>, data: Value) -> Self {
        Self {
            status: "warning",
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
            data: None,
        }
    }
}
