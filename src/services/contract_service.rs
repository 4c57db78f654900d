//! Free-text AI helpers: tenancy-contract analysis (persisted), complaint
//! refinement and forum post ideas.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::config::Config;
use crate::database::rent_repo;
use crate::error::ApiError;
use crate::services::ai_service::{self, CompletionOptions, Message};

pub async fn analyze_contract(
    pool: &SqlitePool,
    config: &Config,
    user_id: &str,
    contract_text: &str,
) -> Result<String, ApiError> {
    let contract_text = contract_text.trim();
    if contract_text.is_empty() {
        return Err(ApiError::BadRequest(
            "No contract text provided for analysis.".into(),
        ));
    }

    let prompt = format!(
        "You are an assistant specializing in UK residential tenancy law. \
         Analyze the rental contract below and summarise: key terms (rent, \
         payment frequency, dates, notice periods), tenant obligations, \
         landlord obligations, potentially unfair clauses under UK consumer \
         or tenancy law (with why), important tenant rights, and 1-2 \
         actionable next steps. Use bullet points under clear headings. Open \
         and close with this disclaimer: \"This analysis is for informational \
         purposes only and does not constitute legal advice. For specific \
         legal guidance, consult a qualified solicitor or housing expert.\"\n\
         \n\
         Contract text:\n---\n{contract_text}\n---"
    );
    let opts = CompletionOptions {
        temperature: 0.5,
        max_tokens: Some(1500),
        json: false,
    };
    let analysis = ai_service::complete(config, &[Message::user(prompt)], &opts).await?;

    rent_repo::insert_contract_analysis(
        pool,
        &Uuid::new_v4().to_string(),
        user_id,
        contract_text,
        &analysis,
    )
    .await?;

    Ok(analysis)
}

pub async fn refine_text(config: &Config, text: &str) -> Result<String, ApiError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest(
            "No text provided for refinement.".into(),
        ));
    }
    let messages = [
        Message::system(
            "You are an assistant that refines complaint texts to be clear, \
             concise, and professional for a UK audience. Keep responses \
             under 200 words.",
        ),
        Message::user(format!("Refine this complaint: \"{text}\"")),
    ];
    let opts = CompletionOptions {
        max_tokens: Some(200),
        ..Default::default()
    };
    Ok(ai_service::complete(config, &messages, &opts).await?)
}

pub async fn generate_forum_idea(config: &Config, topic: Option<&str>) -> Result<String, ApiError> {
    let topic = topic
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("general tenant advice");
    let messages = [
        Message::system(
            "You are an assistant that generates engaging UK-focused forum \
             post ideas for tenants. Provide a short, catchy title and a \
             brief starting question.",
        ),
        Message::user(format!("Generate a forum post idea about: \"{topic}\"")),
    ];
    let opts = CompletionOptions {
        max_tokens: Some(100),
        ..Default::default()
    };
    Ok(ai_service::complete(config, &messages, &opts).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchPolicy;
    use crate::database::testing::memory_pool;
    use crate::error::UpstreamError;

    fn no_key_config() -> Config {
        Config {
            database_url: String::new(),
            host: String::new(),
            port: 0,
            openai_api_key: None,
            openai_api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            openai_model: "test".to_string(),
            opencage_api_key: None,
            opencage_api_url: String::new(),
            match_policy: MatchPolicy::default(),
        }
    }

    #[tokio::test]
    async fn empty_contract_text_is_rejected() {
        let pool = memory_pool().await;
        let err = analyze_contract(&pool, &no_key_config(), "u1", "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn missing_api_key_reports_not_configured() {
        let err = refine_text(&no_key_config(), "my landlord ignores me")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Upstream(UpstreamError::NotConfigured { .. })
        ));
    }
}
