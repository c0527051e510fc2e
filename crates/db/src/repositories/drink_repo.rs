//! Repository for the `drinks` table.

use brewquiz_core::types::DbId;
use sqlx::PgConnection;

use crate::models::drink::DrinkRow;

/// Column list for `drinks` queries.
const COLUMNS: &str = "id, title, recipe";

/// Provides CRUD operations for drinks. Recipes pass through as text.
pub struct DrinkRepo;

impl DrinkRepo {
    pub async fn list_all(conn: &mut PgConnection) -> Result<Vec<DrinkRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drinks ORDER BY id");
        sqlx::query_as::<_, DrinkRow>(&query).fetch_all(conn).await
    }

    /// Find a drink by id, locking the row for the rest of the transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<DrinkRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drinks WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, DrinkRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn create(
        conn: &mut PgConnection,
        title: &str,
        recipe: &str,
    ) -> Result<DrinkRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DrinkRow>(&query)
            .bind(title)
            .bind(recipe)
            .fetch_one(conn)
            .await
    }

    /// Update title and/or recipe. `None` keeps the current value via `COALESCE`.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        title: Option<&str>,
        recipe: Option<&str>,
    ) -> Result<Option<DrinkRow>, sqlx::Error> {
        let query = format!(
            "UPDATE drinks SET \
                title = COALESCE($2, title), \
                recipe = COALESCE($3, recipe) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DrinkRow>(&query)
            .bind(id)
            .bind(title)
            .bind(recipe)
            .fetch_optional(conn)
            .await
    }

    /// Delete a drink. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every drink.
    pub async fn delete_all(conn: &mut PgConnection) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drinks").execute(conn).await?;
        Ok(result.rows_affected())
    }
}
