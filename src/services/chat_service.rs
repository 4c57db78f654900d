use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::chat_repo;
use crate::error::ApiError;
use crate::models::ChatMessageRow;

pub async fn send_message(
    pool: &SqlitePool,
    sender_uid: &str,
    receiver_uid: &str,
    message: &str,
) -> Result<ChatMessageRow, ApiError> {
    let receiver_uid = receiver_uid.trim();
    if receiver_uid.is_empty() {
        return Err(ApiError::BadRequest("Receiver uid is required.".into()));
    }
    let message = message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty.".into()));
    }

    let id = Uuid::new_v4().to_string();
    chat_repo::insert_message(pool, &id, sender_uid, receiver_uid, message).await?;

    // Echo the stored row back so the client can render it immediately.
    Ok(chat_repo::get_message(pool, &id).await?)
}

pub async fn fetch_conversation(
    pool: &SqlitePool,
    user_uid: &str,
    peer_uid: &str,
) -> Result<Vec<ChatMessageRow>, ApiError> {
    Ok(chat_repo::list_conversation(pool, user_uid, peer_uid).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::memory_pool;

    #[tokio::test]
    async fn conversation_is_symmetric_and_time_ordered() {
        let pool = memory_pool().await;
        send_message(&pool, "u1", "u2", "hi").await.unwrap();
        send_message(&pool, "u2", "u1", "hey").await.unwrap();
        send_message(&pool, "u1", "u3", "unrelated").await.unwrap();

        let from_u1 = fetch_conversation(&pool, "u1", "u2").await.unwrap();
        let from_u2 = fetch_conversation(&pool, "u2", "u1").await.unwrap();
        assert_eq!(from_u1.len(), 2);
        assert_eq!(from_u1[0].message, "hi");
        assert_eq!(from_u1[1].message, "hey");
        assert_eq!(
            from_u1.iter().map(|m| &m.id).collect::<Vec<_>>(),
            from_u2.iter().map(|m| &m.id).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn burst_of_messages_keeps_send_order() {
        let pool = memory_pool().await;
        // All of these land within the same sent_at second.
        for i in 0..6 {
            send_message(&pool, "u1", "u2", &format!("m{i}")).await.unwrap();
        }

        let messages = fetch_conversation(&pool, "u1", "u2").await.unwrap();
        let texts: Vec<&str> = messages.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, ["m0", "m1", "m2", "m3", "m4", "m5"]);
    }

    #[tokio::test]
    async fn empty_messages_are_rejected() {
        let pool = memory_pool().await;
        let err = send_message(&pool, "u1", "u2", "   ").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
