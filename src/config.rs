use std::env;

/// Knobs for the match assembler. The weights and clamp bounds were tuned by
/// hand; treat them as policy, not as derived quantities.
#[derive(Debug, Clone)]
pub struct MatchPolicy {
    /// Upper bound on the size of a match response.
    pub target_count: usize,
    /// Synthetic top-up only happens while the opposite-role population is
    /// below this. At or above it, responses are real users only.
    pub synthetic_population_threshold: usize,
    pub display_floor: i64,
    pub display_cap: i64,
    pub display_base: f64,
    pub display_scale: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            target_count: 15,
            synthetic_population_threshold: 15,
            display_floor: 50,
            display_cap: 95,
            display_base: 70.0,
            display_scale: 3.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub openai_model: String,
    pub opencage_api_key: Option<String>,
    pub opencage_api_url: String,
    pub match_policy: MatchPolicy,
}

impl Config {
    /// Read everything from the environment once at startup. Handlers get
    /// this through router state instead of touching `env::var` themselves.
    pub fn from_env() -> Self {
        let mut policy = MatchPolicy::default();
        if let Some(v) = env_parse("MATCH_TARGET_COUNT") {
            policy.target_count = v;
        }
        if let Some(v) = env_parse("MATCH_SYNTHETIC_THRESHOLD") {
            policy.synthetic_population_threshold = v;
        }

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:fairrent.db".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_parse("PORT").unwrap_or(3000),
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            opencage_api_key: env::var("OPENCAGE_API_KEY").ok().filter(|k| !k.is_empty()),
            opencage_api_url: env::var("OPENCAGE_API_URL")
                .unwrap_or_else(|_| "https://api.opencagedata.com/geocode/v1/json".to_string()),
            match_policy: policy,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
