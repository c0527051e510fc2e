//! Repository for the `categories` table.

use sqlx::PgConnection;

use crate::models::category::Category;

/// Read-only access to categories; rows are seeded by migration.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories ordered by id.
    pub async fn list_all(conn: &mut PgConnection) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(conn)
            .await
    }
}
