//! Thin client for the generative text provider (OpenAI-compatible chat
//! completions). Callers build prompts; this module owns transport, auth and
//! the unavailable/unreadable error split.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::UpstreamError;

const SERVICE: &str = "AI service";

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionOptions {
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    /// Ask the provider for a strict-JSON response body.
    pub json: bool,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: None,
            json: false,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub async fn complete(
    config: &Config,
    messages: &[Message],
    opts: &CompletionOptions,
) -> Result<String, UpstreamError> {
    let api_key = config
        .openai_api_key
        .as_deref()
        .ok_or(UpstreamError::NotConfigured { service: SERVICE })?;

    let request = CompletionRequest {
        model: &config.openai_model,
        messages,
        temperature: opts.temperature,
        max_tokens: opts.max_tokens,
        response_format: opts.json.then_some(ResponseFormat {
            kind: "json_object",
        }),
    };

    let client = reqwest::Client::new();
    let resp = client
        .post(&config.openai_api_url)
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await
        .map_err(|e| UpstreamError::Unreachable {
            service: SERVICE,
            source: e,
        })?;

    if !resp.status().is_success() {
        let status =
            StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        return Err(UpstreamError::BadStatus {
            service: SERVICE,
            status,
        });
    }

    let parsed: CompletionResponse = resp.json().await.map_err(|e| UpstreamError::Unreadable {
        service: SERVICE,
        detail: e.to_string(),
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or(UpstreamError::Unreadable {
            service: SERVICE,
            detail: "empty choices".to_string(),
        })
}

/// `complete` plus a JSON parse of the returned text. Providers sometimes
/// wrap the payload in a markdown fence even in json mode, so strip one.
pub async fn complete_json(
    config: &Config,
    messages: &[Message],
    opts: &CompletionOptions,
) -> Result<Value, UpstreamError> {
    let text = complete(config, messages, opts).await?;
    let trimmed = strip_code_fence(text.trim());
    serde_json::from_str(trimmed).map_err(|e| UpstreamError::Unreadable {
        service: SERVICE,
        detail: e.to_string(),
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches(['\r', '\n'])
        .strip_suffix("```")
        .map(str::trim_end)
        .unwrap_or(text)
}
