use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use minierp_backend::db;

/// In-memory database for a single test. Capped at one connection so every
/// request in the test sees the same `:memory:` database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    db::init_schema(&pool)
        .await
        .expect("failed to initialize schema");
    pool
}
