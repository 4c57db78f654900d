use serde::Serialize;

pub const CATEGORIES: &[&str] = &["legal", "accommodation", "maintenance", "local", "other"];

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ForumPostRow {
    pub id: String,
    pub user_id: String,
    pub username: Option<String>,
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ForumReplyRow {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub username: Option<String>,
    pub content: String,
    pub created_at: String,
}
