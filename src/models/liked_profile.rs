use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LikedProfileRow {
    pub id: String,
    pub user_id: String,
    pub liked_candidate_key: String,
    pub liked_name: String,
    pub liked_age: Option<i64>,
    pub liked_gender: Option<String>,
    pub liked_location: Option<String>,
    pub liked_budget: Option<f64>,
    pub liked_bio: Option<String>,
    pub liked_score: Option<i64>,
    pub liked_avatar_url: Option<String>,
    pub liked_at: String,
}
