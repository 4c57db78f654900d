use sqlx::SqlitePool;

use crate::models::{ForumPostRow, ForumReplyRow};

const SQL_INSERT_POST: &str = r#"
INSERT INTO forum_posts (id, user_id, title, content, category)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

const SQL_LIST_POSTS: &str = r#"
SELECT p.id, p.user_id, u.username, p.title, p.content, p.category, p.created_at
FROM forum_posts p
LEFT JOIN users u ON u.user_id = p.user_id
ORDER BY p.created_at DESC
"#;

const SQL_POST_EXISTS: &str = r#"
SELECT 1 FROM forum_posts WHERE id = ?1 LIMIT 1
"#;

const SQL_INSERT_REPLY: &str = r#"
INSERT INTO forum_replies (id, post_id, user_id, content)
VALUES (?1, ?2, ?3, ?4)
"#;

const SQL_LIST_REPLIES: &str = r#"
SELECT r.id, r.post_id, r.user_id, u.username, r.content, r.created_at
FROM forum_replies r
LEFT JOIN users u ON u.user_id = r.user_id
WHERE r.post_id = ?1
ORDER BY r.created_at ASC
"#;

pub struct NewForumPost<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub category: &'a str,
}

pub async fn insert_post(pool: &SqlitePool, post: NewForumPost<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_POST)
        .bind(post.id)
        .bind(post.user_id)
        .bind(post.title)
        .bind(post.content)
        .bind(post.category)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_posts(pool: &SqlitePool) -> sqlx::Result<Vec<ForumPostRow>> {
    sqlx::query_as::<_, ForumPostRow>(SQL_LIST_POSTS)
        .fetch_all(pool)
        .await
}

pub async fn post_exists(pool: &SqlitePool, post_id: &str) -> sqlx::Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as(SQL_POST_EXISTS)
        .bind(post_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn insert_reply(
    pool: &SqlitePool,
    id: &str,
    post_id: &str,
    user_id: &str,
    content: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_REPLY)
        .bind(id)
        .bind(post_id)
        .bind(user_id)
        .bind(content)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_replies(pool: &SqlitePool, post_id: &str) -> sqlx::Result<Vec<ForumReplyRow>> {
    sqlx::query_as::<_, ForumReplyRow>(SQL_LIST_REPLIES)
        .bind(post_id)
        .fetch_all(pool)
        .await
}
