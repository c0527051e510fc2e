//! PostgreSQL-backed stores.

use async_trait::async_trait;
use brewquiz_core::search::substring_pattern;
use brewquiz_core::types::DbId;

use super::{DrinkStore, StoreError, TriviaStore};
use crate::models::category::Category;
use crate::models::drink::{Drink, DrinkChanges, DrinkRow, NewDrink};
use crate::models::question::{NewQuestion, Question};
use crate::repositories::{CategoryRepo, DrinkRepo, QuestionRepo};
use crate::DbPool;

fn decode(row: DrinkRow) -> Result<Drink, StoreError> {
    let id = row.id;
    Drink::try_from(row).map_err(|e| {
        tracing::error!(drink_id = id, error = %e, "Stored recipe failed to decode");
        StoreError::Corrupt(e.to_string())
    })
}

/// Trivia store over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgTriviaStore {
    pool: DbPool,
}

impl PgTriviaStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TriviaStore for PgTriviaStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let categories = CategoryRepo::list_all(&mut tx).await?;
        tx.commit().await?;
        Ok(categories)
    }

    async fn list_questions_with_categories(
        &self,
    ) -> Result<(Vec<Question>, Vec<Category>), StoreError> {
        let mut tx = self.pool.begin().await?;
        let questions = QuestionRepo::list_all(&mut tx).await?;
        let categories = CategoryRepo::list_all(&mut tx).await?;
        tx.commit().await?;
        Ok((questions, categories))
    }

    async fn create_question(&self, input: &NewQuestion) -> Result<Question, StoreError> {
        let mut tx = self.pool.begin().await?;
        let question = QuestionRepo::create(&mut tx, input).await?;
        tx.commit().await?;
        Ok(question)
    }

    async fn delete_question(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let deleted = QuestionRepo::delete(&mut tx, id).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let pattern = substring_pattern(term);
        let mut tx = self.pool.begin().await?;
        let questions = QuestionRepo::search(&mut tx, &pattern).await?;
        tx.commit().await?;
        Ok(questions)
    }

    async fn questions_in_category(&self, category: &str) -> Result<Vec<Question>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let questions = QuestionRepo::list_by_category(&mut tx, category).await?;
        tx.commit().await?;
        Ok(questions)
    }

    async fn quiz_candidates(
        &self,
        category: Option<&str>,
        exclude: &[DbId],
    ) -> Result<Vec<Question>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let questions = QuestionRepo::list_excluding(&mut tx, category, exclude).await?;
        tx.commit().await?;
        Ok(questions)
    }
}

/// Drink store over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgDrinkStore {
    pool: DbPool,
}

impl PgDrinkStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DrinkStore for PgDrinkStore {
    async fn list_drinks(&self) -> Result<Vec<Drink>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let rows = DrinkRepo::list_all(&mut tx).await?;
        tx.commit().await?;
        rows.into_iter().map(decode).collect()
    }

    async fn create_drink(&self, input: &NewDrink) -> Result<Drink, StoreError> {
        let mut tx = self.pool.begin().await?;
        let row = DrinkRepo::create(&mut tx, &input.title, &input.recipe.to_text()).await?;
        tx.commit().await?;
        decode(row)
    }

    async fn update_drink(
        &self,
        id: DbId,
        changes: &DrinkChanges,
    ) -> Result<Option<Drink>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let Some(current) = DrinkRepo::find_for_update(&mut tx, id).await? else {
            return Ok(None);
        };

        let row = if changes.is_empty() {
            current
        } else {
            let recipe = changes.recipe.as_ref().map(|r| r.to_text());
            DrinkRepo::update(&mut tx, id, changes.title.as_deref(), recipe.as_deref())
                .await?
                .unwrap_or(current)
        };
        tx.commit().await?;
        decode(row).map(Some)
    }

    async fn delete_drink(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let deleted = DrinkRepo::delete(&mut tx, id).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    async fn reset(&self, seed: &[NewDrink]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let removed = DrinkRepo::delete_all(&mut tx).await?;
        for drink in seed {
            DrinkRepo::create(&mut tx, &drink.title, &drink.recipe.to_text()).await?;
        }
        tx.commit().await?;
        tracing::info!(removed, seeded = seed.len(), "Drinks table reset");
        Ok(())
    }
}
