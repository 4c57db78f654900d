use sqlx::SqlitePool;

use crate::models::ComplaintRow;

const SQL_INSERT_COMPLAINT: &str = r#"
INSERT INTO complaints (
  id,
  user_id,
  issue_type,
  property_address,
  landlord_name,
  description
) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

const SQL_LIST_COMPLAINTS: &str = r#"
SELECT id, user_id, issue_type, property_address, landlord_name, description, status, submitted_at
FROM complaints
WHERE user_id = ?1
ORDER BY submitted_at DESC
"#;

pub struct NewComplaint<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub issue_type: &'a str,
    pub property_address: &'a str,
    pub landlord_name: Option<&'a str>,
    pub description: &'a str,
}

pub async fn insert_complaint(pool: &SqlitePool, complaint: NewComplaint<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_COMPLAINT)
        .bind(complaint.id)
        .bind(complaint.user_id)
        .bind(complaint.issue_type)
        .bind(complaint.property_address)
        .bind(complaint.landlord_name)
        .bind(complaint.description)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_complaints_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<ComplaintRow>> {
    sqlx::query_as::<_, ComplaintRow>(SQL_LIST_COMPLAINTS)
        .bind(user_id)
        .fetch_all(pool)
        .await
}
