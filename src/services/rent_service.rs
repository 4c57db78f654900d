//! AI-backed rent estimation and the rent-vs-council-tax discrepancy check.
//! Both ask the provider for strict JSON, persist the outcome and return the
//! parsed fields as the response data.

use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;
use uuid::Uuid;

use crate::config::Config;
use crate::database::rent_repo;
use crate::error::ApiError;
use crate::services::ai_service::{self, CompletionOptions, Message};

#[derive(Debug, Deserialize)]
pub struct RentEstimateRequest {
    pub postcode: String,
    pub bedrooms: String,
}

pub async fn predict_rent(
    pool: &SqlitePool,
    config: &Config,
    user_id: Option<&str>,
    request: &RentEstimateRequest,
) -> Result<Value, ApiError> {
    let postcode = request.postcode.trim();
    let bedrooms = request.bedrooms.trim();
    if postcode.is_empty() || bedrooms.is_empty() {
        return Err(ApiError::BadRequest(
            "Postcode and number of bedrooms are required.".into(),
        ));
    }

    let prompt = format!(
        "Act as a UK property market expert. For the postcode \"{postcode}\" \
         and \"{bedrooms}\" bedrooms, respond with ONLY a JSON object with \
         these keys: \"estimated_rent\" (monthly rent in GBP as a whole \
         number), \"rent_range\" (e.g. \"£1400 - £1600 pcm\"), \
         \"amenity_impact\" (1-2 sentences on how local amenities influence \
         rent here), \"market_trend\" (1-2 sentences on the current rental \
         trend), and \"cost_breakdown\" (object with whole-number \
         \"utilities\" and \"council_tax\" monthly estimates)."
    );
    let opts = CompletionOptions {
        temperature: 0.7,
        json: true,
        ..Default::default()
    };
    let data = ai_service::complete_json(config, &[Message::user(prompt)], &opts).await?;

    let estimated_rent = data.get("estimated_rent").and_then(number_from);
    if let Some(user_id) = user_id {
        persist_rent_check(pool, user_id, postcode, bedrooms, estimated_rent).await;
    }

    let predicted = estimated_rent
        .map(|r| format!("£{r:.0} pcm"))
        .unwrap_or_else(|| "N/A".to_string());
    Ok(json!({
        "predicted_rent": predicted,
        "range": data.get("rent_range").cloned().unwrap_or(Value::Null),
        "amenity_impact": data.get("amenity_impact").cloned().unwrap_or(Value::Null),
        "market_trend": data.get("market_trend").cloned().unwrap_or(Value::Null),
        "cost_breakdown": data.get("cost_breakdown").cloned().unwrap_or(Value::Null),
    }))
}

#[derive(Debug, Deserialize)]
pub struct DeclarationCheckRequest {
    pub postcode: String,
    pub bedrooms: String,
    pub actual_rent_paid: Option<f64>,
    pub council_tax_band: String,
}

pub async fn check_rent_declaration(
    pool: &SqlitePool,
    config: &Config,
    user_id: &str,
    request: &DeclarationCheckRequest,
) -> Result<Value, ApiError> {
    let postcode = request.postcode.trim();
    let bedrooms = request.bedrooms.trim();
    let band = request.council_tax_band.trim();
    let Some(actual_rent) = request.actual_rent_paid else {
        return Err(ApiError::BadRequest(
            "All fields (postcode, bedrooms, actual rent paid, council tax band) are required."
                .into(),
        ));
    };
    if postcode.is_empty() || bedrooms.is_empty() || band.is_empty() {
        return Err(ApiError::BadRequest(
            "All fields (postcode, bedrooms, actual rent paid, council tax band) are required."
                .into(),
        ));
    }
    if actual_rent <= 0.0 {
        return Err(ApiError::BadRequest(
            "Invalid value for actual rent paid. Must be a positive number.".into(),
        ));
    }

    let prompt = format!(
        "Act as a UK property and council tax expert. A tenant pays \
         £{actual_rent:.0} per month for a {bedrooms}-bedroom property with \
         postcode {postcode}, in Council Tax Band {band}. Respond with ONLY a \
         JSON object with these keys: \"estimated_council_tax\" (monthly GBP, \
         whole number), \"common_rent_for_band_area\" (typical monthly rent \
         for such a property, whole number), \"discrepancy_found\" (boolean: \
         does the rent look out of line with the band and typical local \
         rents?), and \"analysis_result\" (2-3 sentences explaining the \
         finding with practical advice for the tenant)."
    );
    let opts = CompletionOptions {
        temperature: 0.7,
        json: true,
        ..Default::default()
    };
    let data = ai_service::complete_json(config, &[Message::user(prompt)], &opts).await?;

    let estimated_council_tax = data.get("estimated_council_tax").and_then(number_from);
    let discrepancy_found = data
        .get("discrepancy_found")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let analysis_result = data.get("analysis_result").and_then(Value::as_str);
    if analysis_result.is_none() {
        warn!("declaration check response missing analysis_result");
    }

    rent_repo::insert_declaration_check(
        pool,
        rent_repo::NewDeclarationCheck {
            id: &Uuid::new_v4().to_string(),
            user_id,
            postcode,
            bedrooms,
            actual_rent_paid: actual_rent,
            council_tax_band: Some(band),
            estimated_council_tax,
            discrepancy_found,
            analysis_result,
        },
    )
    .await?;

    Ok(json!({
        "estimated_council_tax": estimated_council_tax,
        "common_rent_for_band_area": data.get("common_rent_for_band_area").cloned().unwrap_or(Value::Null),
        "discrepancy_found": discrepancy_found,
        "analysis_result": analysis_result.unwrap_or("No analysis provided."),
    }))
}

/// History is a convenience, not part of the estimate: a caller whose local
/// user row does not exist yet (first request on this public endpoint) must
/// still get their result.
async fn persist_rent_check(
    pool: &SqlitePool,
    user_id: &str,
    postcode: &str,
    bedrooms: &str,
    estimated_rent: Option<f64>,
) {
    let result = rent_repo::insert_rent_check(
        pool,
        &Uuid::new_v4().to_string(),
        Some(user_id),
        postcode,
        bedrooms,
        estimated_rent,
    )
    .await;
    if let Err(e) = result {
        warn!(error = %e, "could not persist rent check");
    }
}

fn number_from(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}
