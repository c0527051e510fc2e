//! Repository for the `questions` table.

use brewquiz_core::types::DbId;
use sqlx::PgConnection;

use crate::models::question::{NewQuestion, Question};

/// Column list for `questions` queries.
const COLUMNS: &str = "id, question, answer, category, difficulty";

/// Provides create, delete and filtered reads for questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a question, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &NewQuestion,
    ) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (question, answer, category, difficulty) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(&input.category)
            .bind(input.difficulty)
            .fetch_one(conn)
            .await
    }

    /// List every question ordered by id.
    pub async fn list_all(conn: &mut PgConnection) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions ORDER BY id");
        sqlx::query_as::<_, Question>(&query).fetch_all(conn).await
    }

    /// Questions whose text matches an `ILIKE` pattern.
    pub async fn search(
        conn: &mut PgConnection,
        pattern: &str,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE question ILIKE $1 ORDER BY id");
        sqlx::query_as::<_, Question>(&query)
            .bind(pattern)
            .fetch_all(conn)
            .await
    }

    /// Questions whose category equals `category` exactly.
    pub async fn list_by_category(
        conn: &mut PgConnection,
        category: &str,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE category = $1 ORDER BY id");
        sqlx::query_as::<_, Question>(&query)
            .bind(category)
            .fetch_all(conn)
            .await
    }

    /// Questions not in `exclude`, optionally restricted to one category.
    pub async fn list_excluding(
        conn: &mut PgConnection,
        category: Option<&str>,
        exclude: &[DbId],
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions \
             WHERE ($1::TEXT IS NULL OR category = $1) \
               AND NOT (id = ANY($2)) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(category)
            .bind(exclude)
            .fetch_all(conn)
            .await
    }

    /// Delete a question. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
