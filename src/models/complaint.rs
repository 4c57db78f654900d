use serde::Serialize;

pub const ISSUE_TYPES: &[&str] = &[
    "repairs",
    "noise",
    "deposit",
    "harassment",
    "privacy",
    "other",
];

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ComplaintRow {
    pub id: String,
    pub user_id: String,
    pub issue_type: String,
    pub property_address: String,
    pub landlord_name: Option<String>,
    pub description: String,
    pub status: String,
    pub submitted_at: String,
}
