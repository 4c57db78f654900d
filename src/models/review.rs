use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LandlordReviewRow {
    pub id: String,
    pub user_id: String,
    pub username: Option<String>,
    pub landlord_name: String,
    pub property_address: String,
    pub rating: i64,
    pub comments: String,
    pub reviewed_at: String,
}
