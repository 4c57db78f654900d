use sqlx::SqlitePool;

use crate::models::NotificationRow;

const SQL_INSERT_NOTIFICATION: &str = r#"
INSERT INTO notifications (id, user_id, kind, message)
VALUES (?1, ?2, ?3, ?4)
"#;

const SQL_LIST_NOTIFICATIONS: &str = r#"
SELECT id, user_id, kind, message, is_read, created_at
FROM notifications
WHERE user_id = ?1
ORDER BY created_at DESC
"#;

const SQL_MARK_READ: &str = r#"
UPDATE notifications SET is_read = 1 WHERE id = ?1 AND user_id = ?2
"#;

pub async fn insert_notification(
    executor: impl sqlx::SqliteExecutor<'_>,
    id: &str,
    user_id: &str,
    kind: &str,
    message: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_NOTIFICATION)
        .bind(id)
        .bind(user_id)
        .bind(kind)
        .bind(message)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn list_notifications_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<NotificationRow>> {
    sqlx::query_as::<_, NotificationRow>(SQL_LIST_NOTIFICATIONS)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Scoped to the owning user; returns how many rows changed so the caller
/// can distinguish "marked" from "not yours / not found".
pub async fn mark_notification_read(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_MARK_READ)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
