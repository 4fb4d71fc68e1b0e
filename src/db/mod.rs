use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::env;
use std::str::FromStr;

/// Connect to the database named by `DATABASE_URL`, defaulting to a local
/// SQLite file when the variable is unset.
pub async fn create_pool() -> Result<SqlitePool, sqlx::Error> {
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://employees.db".to_string());
    let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    SqlitePool::connect_with(options).await
}

/// Create the two tables if they do not exist yet. Referential integrity for
/// `employees.department_id` is enforced in the handlers at write time, so the
/// column is a plain nullable integer here.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS departments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            description TEXT
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT,
            role TEXT,
            salary REAL,
            active BOOLEAN NOT NULL DEFAULT 1,
            date_joined DATE NOT NULL,
            department_id INTEGER REFERENCES departments(id)
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
