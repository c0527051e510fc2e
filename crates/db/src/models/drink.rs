//! Drink model, its short/long public forms, and write DTOs.

use brewquiz_core::recipe::{Ingredient, Recipe, ShortIngredient};
use brewquiz_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `drinks` table, recipe still encoded.
#[derive(Debug, Clone, FromRow)]
pub struct DrinkRow {
    pub id: DbId,
    pub title: String,
    pub recipe: String,
}

/// A drink with its recipe decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    pub id: DbId,
    pub title: String,
    pub recipe: Recipe,
}

impl TryFrom<DrinkRow> for Drink {
    type Error = brewquiz_core::error::CoreError;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            recipe: Recipe::from_text(&row.recipe)?,
            title: row.title,
        })
    }
}

/// Public drink representation: colors and parts only.
#[derive(Debug, Clone, Serialize)]
pub struct DrinkShort {
    pub id: DbId,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Detailed drink representation including ingredient names.
#[derive(Debug, Clone, Serialize)]
pub struct DrinkLong {
    pub id: DbId,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.short(),
        }
    }

    pub fn long(&self) -> DrinkLong {
        DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.ingredients().to_vec(),
        }
    }
}

/// DTO for inserting a drink.
#[derive(Debug, Clone)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Recipe,
}

/// Partial update of a drink. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct DrinkChanges {
    pub title: Option<String>,
    pub recipe: Option<Recipe>,
}

impl DrinkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.recipe.is_none()
    }

    /// Apply the changes to an in-memory drink.
    pub fn apply_to(&self, drink: &mut Drink) {
        if let Some(title) = &self.title {
            drink.title = title.clone();
        }
        if let Some(recipe) = &self.recipe {
            drink.recipe = recipe.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn water() -> Drink {
        Drink {
            id: 1,
            title: "water".into(),
            recipe: Recipe(vec![Ingredient {
                color: "blue".into(),
                name: "water".into(),
                parts: 1,
            }]),
        }
    }

    #[test]
    fn short_and_long_forms() {
        let drink = water();
        assert_eq!(
            serde_json::to_value(drink.short()).unwrap(),
            json!({"id": 1, "title": "water", "recipe": [{"color": "blue", "parts": 1}]})
        );
        assert_eq!(
            serde_json::to_value(drink.long()).unwrap(),
            json!({
                "id": 1,
                "title": "water",
                "recipe": [{"color": "blue", "name": "water", "parts": 1}]
            })
        );
    }

    #[test]
    fn row_with_corrupt_recipe_fails_to_decode() {
        let row = DrinkRow {
            id: 3,
            title: "mystery".into(),
            recipe: "{".into(),
        };
        assert!(Drink::try_from(row).is_err());
    }

    #[test]
    fn changes_only_touch_provided_fields() {
        let mut drink = water();
        let changes = DrinkChanges {
            title: Some("sparkling water".into()),
            recipe: None,
        };
        changes.apply_to(&mut drink);
        assert_eq!(drink.title, "sparkling water");
        assert_eq!(drink.recipe, water().recipe);
        assert!(DrinkChanges::default().is_empty());
    }
}
