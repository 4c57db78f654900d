//! Address autocomplete against the geocoding provider. Returns formatted
//! address strings; lenient about response shape beyond that.

use axum::http::StatusCode;
use serde::Deserialize;

use crate::config::Config;
use crate::error::UpstreamError;

const SERVICE: &str = "address suggestion service";
const SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeHit>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    formatted: Option<String>,
}

pub async fn address_suggestions(
    config: &Config,
    query: &str,
) -> Result<Vec<String>, UpstreamError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let api_key = config
        .opencage_api_key
        .as_deref()
        .ok_or(UpstreamError::NotConfigured { service: SERVICE })?;

    let client = reqwest::Client::new();
    let resp = client
        .get(&config.opencage_api_url)
        .query(&[
            ("q", query),
            ("key", api_key),
            ("countrycode", "gb"),
            ("limit", &SUGGESTION_LIMIT.to_string()),
        ])
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

    let parsed: GeocodeResponse = resp.json().await.map_err(|e| UpstreamError::Unreadable {
        service: SERVICE,
        detail: e.to_string(),
    })?;

    Ok(parsed
        .results
        .unwrap_or_default()
        .into_iter()
        .filter_map(|hit| hit.formatted)
        .collect())
}
