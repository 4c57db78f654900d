pub mod chat_repo;
pub mod complaint_repo;
pub mod forum_repo;
pub mod liked_profile_repo;
pub mod notification_repo;
pub mod profile_repo;
pub mod rent_repo;
pub mod review_repo;
pub mod user_repo;

/// Embedded migrations; also used to build throwaway in-memory pools in
/// tests.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

#[cfg(test)]
pub(crate) mod testing {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    // One connection, or every statement would see a different :memory: db.
    pub async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        super::MIGRATOR.run(&pool).await.expect("migrations");
        pool
    }

    pub async fn seed_user(pool: &SqlitePool, user_id: &str, username: &str) {
        crate::database::user_repo::ensure_user(pool, user_id, username)
            .await
            .expect("seed user");
    }
}
