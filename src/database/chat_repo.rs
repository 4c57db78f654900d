use sqlx::SqlitePool;

use crate::models::ChatMessageRow;

const SQL_INSERT_MESSAGE: &str = r#"
INSERT INTO chat_messages (id, sender_uid, receiver_uid, message)
VALUES (?1, ?2, ?3, ?4)
"#;

const SQL_GET_MESSAGE: &str = r#"
SELECT id, sender_uid, receiver_uid, message, sent_at
FROM chat_messages
WHERE id = ?1
"#;

const SQL_LIST_CONVERSATION: &str = r#"
SELECT id, sender_uid, receiver_uid, message, sent_at
FROM chat_messages
WHERE (sender_uid = ?1 AND receiver_uid = ?2)
   OR (sender_uid = ?2 AND receiver_uid = ?1)
ORDER BY seq ASC
"#;

pub async fn insert_message(
    pool: &SqlitePool,
    id: &str,
    sender_uid: &str,
    receiver_uid: &str,
    message: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_MESSAGE)
        .bind(id)
        .bind(sender_uid)
        .bind(receiver_uid)
        .bind(message)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn get_message(pool: &SqlitePool, id: &str) -> sqlx::Result<ChatMessageRow> {
    sqlx::query_as::<_, ChatMessageRow>(SQL_GET_MESSAGE)
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn list_conversation(
    pool: &SqlitePool,
    user_uid: &str,
    peer_uid: &str,
) -> sqlx::Result<Vec<ChatMessageRow>> {
    sqlx::query_as::<_, ChatMessageRow>(SQL_LIST_CONVERSATION)
        .bind(user_uid)
        .bind(peer_uid)
        .fetch_all(pool)
        .await
}
