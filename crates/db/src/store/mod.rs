//! Store traits consumed by the HTTP handlers.
//!
//! Each method is one unit of work: the PostgreSQL implementations open a
//! transaction per call, commit on success and roll back (by dropping the
//! transaction) on any error. The in-memory implementations serialize calls
//! behind a mutex.

use async_trait::async_trait;
use brewquiz_core::types::DbId;

use crate::models::category::Category;
use crate::models::drink::{Drink, DrinkChanges, NewDrink};
use crate::models::question::{NewQuestion, Question};

pub mod memory;
pub mod postgres;

pub use memory::{MemoryDrinkStore, MemoryTriviaStore};
pub use postgres::{PgDrinkStore, PgTriviaStore};

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors surfaced by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A stored value could not be decoded.
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return StoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
        StoreError::Database(err)
    }
}

/// Data access for the trivia service.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// All categories ordered by id.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// All questions ordered by id, together with all categories.
    async fn list_questions_with_categories(
        &self,
    ) -> Result<(Vec<Question>, Vec<Category>), StoreError>;

    async fn create_question(&self, input: &NewQuestion) -> Result<Question, StoreError>;

    /// Returns `false` when no question has this id.
    async fn delete_question(&self, id: DbId) -> Result<bool, StoreError>;

    /// Questions whose text contains `term`, ignoring case.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError>;

    async fn questions_in_category(&self, category: &str) -> Result<Vec<Question>, StoreError>;

    /// Questions not in `exclude`, restricted to `category` when given.
    async fn quiz_candidates(
        &self,
        category: Option<&str>,
        exclude: &[DbId],
    ) -> Result<Vec<Question>, StoreError>;
}

/// Data access for the coffee-shop service.
#[async_trait]
pub trait DrinkStore: Send + Sync {
    async fn list_drinks(&self) -> Result<Vec<Drink>, StoreError>;

    async fn create_drink(&self, input: &NewDrink) -> Result<Drink, StoreError>;

    /// Apply `changes` to drink `id`. Returns `None` when the drink is missing.
    async fn update_drink(
        &self,
        id: DbId,
        changes: &DrinkChanges,
    ) -> Result<Option<Drink>, StoreError>;

    /// Returns `false` when no drink has this id.
    async fn delete_drink(&self, id: DbId) -> Result<bool, StoreError>;

    /// Drop every drink and insert `seed`.
    async fn reset(&self, seed: &[NewDrink]) -> Result<(), StoreError>;
}
