use sqlx::SqlitePool;

use crate::database::notification_repo;
use crate::error::ApiError;
use crate::models::NotificationRow;

pub async fn list_notifications(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<NotificationRow>, ApiError> {
    Ok(notification_repo::list_notifications_for_user(pool, user_id).await?)
}

pub async fn mark_read(pool: &SqlitePool, user_id: &str, id: &str) -> Result<(), ApiError> {
    let changed = notification_repo::mark_notification_read(pool, id, user_id).await?;
    if changed == 0 {
        return Err(ApiError::NotFound("Notification not found.".into()));
    }
    Ok(())
}
