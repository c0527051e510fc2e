//! Drink recipe model and its two public forms.
//!
//! A recipe is a list of ingredients persisted as serialized JSON text. The
//! long form exposes every ingredient field; the short form keeps only what
//! is needed to draw the drink (color and parts).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// One ingredient of a drink recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub color: String,
    pub name: String,
    pub parts: u32,
}

/// Ingredient as shown in the short (public) drink form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

impl From<&Ingredient> for ShortIngredient {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            color: ingredient.color.clone(),
            parts: ingredient.parts,
        }
    }
}

/// An ordered list of ingredients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe(pub Vec<Ingredient>);

impl Recipe {
    /// Build a recipe from a request payload value.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        serde_json::from_value(value).map_err(|e| CoreError::InvalidRecipe(e.to_string()))
    }

    /// Decode the text stored in the `recipe` column.
    pub fn from_text(text: &str) -> Result<Self, CoreError> {
        serde_json::from_str(text).map_err(|e| CoreError::InvalidRecipe(e.to_string()))
    }

    /// Encode for storage in the `recipe` column.
    pub fn to_text(&self) -> String {
        // A Vec of plain structs with string keys always serializes.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn short(&self) -> Vec<ShortIngredient> {
        self.0.iter().map(ShortIngredient::from).collect()
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn latte() -> Recipe {
        Recipe(vec![
            Ingredient {
                color: "brown".into(),
                name: "espresso".into(),
                parts: 1,
            },
            Ingredient {
                color: "white".into(),
                name: "milk".into(),
                parts: 3,
            },
        ])
    }

    #[test]
    fn stored_text_decodes_to_the_same_recipe() {
        let recipe = latte();
        assert_eq!(Recipe::from_text(&recipe.to_text()).unwrap(), recipe);
    }

    #[test]
    fn short_form_drops_names() {
        let short = serde_json::to_value(latte().short()).unwrap();
        assert_eq!(
            short,
            json!([{"color": "brown", "parts": 1}, {"color": "white", "parts": 3}])
        );
    }

    #[test]
    fn payload_must_be_a_list_of_ingredients() {
        assert_matches!(
            Recipe::from_value(json!({"color": "blue"})),
            Err(CoreError::InvalidRecipe(_))
        );
        assert_matches!(
            Recipe::from_value(json!([{"color": "blue", "name": "water"}])),
            Err(CoreError::InvalidRecipe(_))
        );
        assert_eq!(Recipe::from_value(json!([])).unwrap(), Recipe::default());
    }

    #[test]
    fn corrupt_text_is_reported() {
        assert_matches!(Recipe::from_text("not json"), Err(CoreError::InvalidRecipe(_)));
    }
}
