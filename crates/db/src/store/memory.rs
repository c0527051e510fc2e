//! In-memory stores for tests and database-less local runs.
//!
//! Ids are assigned from a counter starting at 1, mirroring `BIGSERIAL`.
//! Every operation holds the store mutex for its whole duration, so each call
//! is atomic just like a committed transaction.

use async_trait::async_trait;
use brewquiz_core::search::matches_term;
use brewquiz_core::types::DbId;
use tokio::sync::Mutex;

use super::{DrinkStore, StoreError, TriviaStore};
use crate::models::category::Category;
use crate::models::drink::{Drink, DrinkChanges, NewDrink};
use crate::models::question::{NewQuestion, Question};

/// Default category labels, matching the trivia seed migration.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

#[derive(Debug, Default)]
struct TriviaTables {
    categories: Vec<Category>,
    questions: Vec<Question>,
    next_question_id: DbId,
}

/// Trivia store holding everything in process memory.
#[derive(Debug)]
pub struct MemoryTriviaStore {
    tables: Mutex<TriviaTables>,
}

impl MemoryTriviaStore {
    /// Empty store with no categories and no questions.
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(TriviaTables {
                next_question_id: 1,
                ..TriviaTables::default()
            }),
        }
    }

    /// Store seeded with the default categories (ids 1..=6).
    pub fn with_default_categories() -> Self {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .zip(1..)
            .map(|(kind, id)| Category {
                id,
                kind: (*kind).to_string(),
            })
            .collect();
        Self::with_categories(categories)
    }

    pub fn with_categories(mut categories: Vec<Category>) -> Self {
        categories.sort_by_key(|c| c.id);
        Self {
            tables: Mutex::new(TriviaTables {
                categories,
                questions: Vec::new(),
                next_question_id: 1,
            }),
        }
    }
}

impl Default for MemoryTriviaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TriviaStore for MemoryTriviaStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.tables.lock().await.categories.clone())
    }

    async fn list_questions_with_categories(
        &self,
    ) -> Result<(Vec<Question>, Vec<Category>), StoreError> {
        let tables = self.tables.lock().await;
        Ok((tables.questions.clone(), tables.categories.clone()))
    }

    async fn create_question(&self, input: &NewQuestion) -> Result<Question, StoreError> {
        let mut tables = self.tables.lock().await;
        let question = Question {
            id: tables.next_question_id,
            question: input.question.clone(),
            answer: input.answer.clone(),
            category: input.category.clone(),
            difficulty: input.difficulty,
        };
        tables.next_question_id += 1;
        tables.questions.push(question.clone());
        Ok(question)
    }

    async fn delete_question(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        let before = tables.questions.len();
        tables.questions.retain(|q| q.id != id);
        Ok(tables.questions.len() < before)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .questions
            .iter()
            .filter(|q| matches_term(&q.question, term))
            .cloned()
            .collect())
    }

    async fn questions_in_category(&self, category: &str) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .questions
            .iter()
            .filter(|q| q.category == category)
            .cloned()
            .collect())
    }

    async fn quiz_candidates(
        &self,
        category: Option<&str>,
        exclude: &[DbId],
    ) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .questions
            .iter()
            .filter(|q| category.map_or(true, |c| q.category == c))
            .filter(|q| !exclude.contains(&q.id))
            .cloned()
            .collect())
    }
}

#[derive(Debug)]
struct DrinkTable {
    drinks: Vec<Drink>,
    next_id: DbId,
}

impl DrinkTable {
    fn insert(&mut self, input: &NewDrink) -> Result<Drink, StoreError> {
        self.ensure_unique_title(&input.title, None)?;
        let drink = Drink {
            id: self.next_id,
            title: input.title.clone(),
            recipe: input.recipe.clone(),
        };
        self.next_id += 1;
        self.drinks.push(drink.clone());
        Ok(drink)
    }

    fn ensure_unique_title(&self, title: &str, except: Option<DbId>) -> Result<(), StoreError> {
        let taken = self
            .drinks
            .iter()
            .any(|d| d.title == title && Some(d.id) != except);
        if taken {
            return Err(StoreError::Conflict(format!(
                "Duplicate value violates unique constraint: uq_drinks_title ({title})"
            )));
        }
        Ok(())
    }
}

/// Drink store holding everything in process memory. Titles are unique,
/// as enforced by `uq_drinks_title` in PostgreSQL.
#[derive(Debug)]
pub struct MemoryDrinkStore {
    table: Mutex<DrinkTable>,
}

impl MemoryDrinkStore {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(DrinkTable {
                drinks: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryDrinkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DrinkStore for MemoryDrinkStore {
    async fn list_drinks(&self) -> Result<Vec<Drink>, StoreError> {
        Ok(self.table.lock().await.drinks.clone())
    }

    async fn create_drink(&self, input: &NewDrink) -> Result<Drink, StoreError> {
        self.table.lock().await.insert(input)
    }

    async fn update_drink(
        &self,
        id: DbId,
        changes: &DrinkChanges,
    ) -> Result<Option<Drink>, StoreError> {
        let mut table = self.table.lock().await;
        if let Some(title) = &changes.title {
            if table.drinks.iter().any(|d| d.id == id) {
                table.ensure_unique_title(title, Some(id))?;
            }
        }
        let Some(drink) = table.drinks.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        changes.apply_to(drink);
        Ok(Some(drink.clone()))
    }

    async fn delete_drink(&self, id: DbId) -> Result<bool, StoreError> {
        let mut table = self.table.lock().await;
        let before = table.drinks.len();
        table.drinks.retain(|d| d.id != id);
        Ok(table.drinks.len() < before)
    }

    async fn reset(&self, seed: &[NewDrink]) -> Result<(), StoreError> {
        let mut table = self.table.lock().await;
        let mut fresh = DrinkTable {
            drinks: Vec::new(),
            next_id: table.next_id,
        };
        for drink in seed {
            fresh.insert(drink)?;
        }
        *table = fresh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use brewquiz_core::recipe::{Ingredient, Recipe};

    use super::*;

    fn new_question(text: &str, category: &str) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "answer".to_string(),
            category: category.to_string(),
            difficulty: 2,
        }
    }

    fn new_drink(title: &str) -> NewDrink {
        NewDrink {
            title: title.to_string(),
            recipe: Recipe(vec![Ingredient {
                color: "blue".into(),
                name: "water".into(),
                parts: 1,
            }]),
        }
    }

    #[tokio::test]
    async fn question_ids_are_sequential() {
        let store = MemoryTriviaStore::with_default_categories();
        let a = store.create_question(&new_question("A?", "1")).await.unwrap();
        let b = store.create_question(&new_question("B?", "1")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn delete_reports_missing_question() {
        let store = MemoryTriviaStore::new();
        let q = store.create_question(&new_question("A?", "1")).await.unwrap();
        assert!(store.delete_question(q.id).await.unwrap());
        assert!(!store.delete_question(q.id).await.unwrap());
    }

    #[tokio::test]
    async fn quiz_candidates_respect_category_and_exclusions() {
        let store = MemoryTriviaStore::new();
        let a = store.create_question(&new_question("A?", "1")).await.unwrap();
        let b = store.create_question(&new_question("B?", "1")).await.unwrap();
        store.create_question(&new_question("C?", "2")).await.unwrap();

        let pool = store.quiz_candidates(Some("1"), &[a.id]).await.unwrap();
        assert_eq!(pool.iter().map(|q| q.id).collect::<Vec<_>>(), vec![b.id]);

        let everything = store.quiz_candidates(None, &[]).await.unwrap();
        assert_eq!(everything.len(), 3);
    }

    #[tokio::test]
    async fn default_categories_are_ordered() {
        let store = MemoryTriviaStore::with_default_categories();
        let categories = store.list_categories().await.unwrap();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[0].kind, "Science");
    }

    #[tokio::test]
    async fn duplicate_drink_title_conflicts() {
        let store = MemoryDrinkStore::new();
        store.create_drink(&new_drink("water")).await.unwrap();
        assert_matches!(
            store.create_drink(&new_drink("water")).await,
            Err(StoreError::Conflict(_))
        );
    }

    #[tokio::test]
    async fn update_missing_drink_is_none() {
        let store = MemoryDrinkStore::new();
        let changes = DrinkChanges {
            title: Some("tea".into()),
            recipe: None,
        };
        assert_eq!(store.update_drink(9, &changes).await.unwrap(), None);
    }

    #[tokio::test]
    async fn reset_replaces_all_drinks() {
        let store = MemoryDrinkStore::new();
        store.create_drink(&new_drink("latte")).await.unwrap();
        store.reset(&[new_drink("water")]).await.unwrap();

        let drinks = store.list_drinks().await.unwrap();
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].title, "water");
    }

    #[tokio::test]
    async fn failed_reset_keeps_existing_drinks() {
        let store = MemoryDrinkStore::new();
        store.create_drink(&new_drink("latte")).await.unwrap();

        let result = store.reset(&[new_drink("water"), new_drink("water")]).await;
        assert_matches!(result, Err(StoreError::Conflict(_)));

        let drinks = store.list_drinks().await.unwrap();
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].title, "latte");
    }
}
