use serde::Serialize;
use uuid::Uuid;

use super::roommate_profile::Role;

const SYNTHETIC_PREFIX: &str = "ai_profile_";

/// Identity of a match candidate. Real candidates point at a user account;
/// synthetic ones are generated fillers and only ever exist inside a match
/// response (and, if liked, as a snapshot in liked_profiles).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateKey {
    Real(String),
    Synthetic(String),
}

impl CandidateKey {
    pub fn new_synthetic() -> Self {
        CandidateKey::Synthetic(Uuid::new_v4().to_string())
    }

    /// Wire format round-trip. Anything without the synthetic prefix is a
    /// real user key; unknown keys resolve to nothing later and are handled
    /// as best-effort there.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(SYNTHETIC_PREFIX) {
            Some(token) => CandidateKey::Synthetic(token.to_string()),
            None => CandidateKey::Real(raw.to_string()),
        }
    }

    pub fn as_wire(&self) -> String {
        match self {
            CandidateKey::Real(user_id) => user_id.clone(),
            CandidateKey::Synthetic(token) => format!("{SYNTHETIC_PREFIX}{token}"),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, CandidateKey::Synthetic(_))
    }

    pub fn real_user_id(&self) -> Option<&str> {
        match self {
            CandidateKey::Real(user_id) => Some(user_id),
            CandidateKey::Synthetic(_) => None,
        }
    }
}

/// One scored candidate as returned by the match endpoint. Transient; never
/// persisted as-is.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateMatch {
    #[serde(rename = "uid", serialize_with = "serialize_key")]
    pub key: CandidateKey,
    pub role: Role,
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub location: Option<String>,
    /// Budget for seeking candidates, rent for offering ones.
    pub amount: Option<f64>,
    pub bio: Option<String>,
    #[serde(skip)]
    pub score: f64,
    pub compatibility_score: i64,
    pub avatar_url: String,
    pub synthetic: bool,
}

fn serialize_key<S: serde::Serializer>(key: &CandidateKey, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&key.as_wire())
}
