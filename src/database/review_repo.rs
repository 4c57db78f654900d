use sqlx::SqlitePool;

use crate::models::LandlordReviewRow;

const SQL_INSERT_REVIEW: &str = r#"
INSERT INTO landlord_reviews (
  id,
  user_id,
  landlord_name,
  property_address,
  rating,
  comments
) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

// Reviews are a public directory, so list everything.
const SQL_LIST_REVIEWS: &str = r#"
SELECT
  r.id,
  r.user_id,
  u.username,
  r.landlord_name,
  r.property_address,
  r.rating,
  r.comments,
  r.reviewed_at
FROM landlord_reviews r
LEFT JOIN users u ON u.user_id = r.user_id
ORDER BY r.reviewed_at DESC
"#;

pub struct NewReview<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub landlord_name: &'a str,
    pub property_address: &'a str,
    pub rating: i64,
    pub comments: &'a str,
}

pub async fn insert_review(pool: &SqlitePool, review: NewReview<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_REVIEW)
        .bind(review.id)
        .bind(review.user_id)
        .bind(review.landlord_name)
        .bind(review.property_address)
        .bind(review.rating)
        .bind(review.comments)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_reviews(pool: &SqlitePool) -> sqlx::Result<Vec<LandlordReviewRow>> {
    sqlx::query_as::<_, LandlordReviewRow>(SQL_LIST_REVIEWS)
        .fetch_all(pool)
        .await
}
