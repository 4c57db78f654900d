use sqlx::SqlitePool;

const SQL_ENSURE_USER: &str = r#"
INSERT INTO users (user_id, username)
VALUES (?1, ?2)
ON CONFLICT (user_id) DO NOTHING
"#;

const SQL_USER_EXISTS: &str = r#"
SELECT 1 FROM users WHERE user_id = ?1 LIMIT 1
"#;

/// Users are provisioned by the auth layer; this keeps a local row in sync
/// so foreign keys and notification fan-out have something to point at.
pub async fn ensure_user(pool: &SqlitePool, user_id: &str, username: &str) -> sqlx::Result<()> {
    sqlx::query(SQL_ENSURE_USER)
        .bind(user_id)
        .bind(username)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn user_exists(
    executor: impl sqlx::SqliteExecutor<'_>,
    user_id: &str,
) -> sqlx::Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as(SQL_USER_EXISTS)
        .bind(user_id)
        .fetch_optional(executor)
        .await?;
    Ok(row.is_some())
}
