use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ChatMessageRow {
    pub id: String,
    pub sender_uid: String,
    pub receiver_uid: String,
    pub message: String,
    pub sent_at: String,
}
