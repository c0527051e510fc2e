//! Persistence layer for the trivia and coffee-shop services.
//!
//! - [`models`] -- row structs and write DTOs.
//! - [`repositories`] -- single-statement sqlx queries, one repo per table.
//! - [`store`] -- the store traits handlers depend on, with PostgreSQL and
//!   in-memory implementations.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the trivia schema (`categories`, `questions`) and seed categories.
pub async fn run_trivia_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations/trivia").run(pool).await
}

/// Apply the coffee-shop schema (`drinks`).
pub async fn run_coffee_shop_migrations(
    pool: &DbPool,
) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations/coffee_shop").run(pool).await
}
