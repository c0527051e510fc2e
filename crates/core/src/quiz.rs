//! Quiz round selection.

use rand::seq::IndexedRandom;
use serde::Deserialize;

use crate::error::CoreError;
use crate::scalar::Scalar;

/// Category `type` the client sends when the player picked "All".
pub const ALL_CATEGORIES: &str = "click";

/// The `quiz_category` object of a quiz request.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategory {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: Option<Scalar>,
}

impl QuizCategory {
    /// Category id the candidate pool is restricted to, or `None` for all
    /// categories.
    pub fn category_filter(&self) -> Result<Option<String>, CoreError> {
        if self.kind == ALL_CATEGORIES {
            return Ok(None);
        }
        self.id
            .clone()
            .map(|id| Some(id.into_text()))
            .ok_or_else(|| CoreError::Validation("quiz_category.id is required".into()))
    }
}

/// Pick one candidate uniformly at random.
pub fn pick_random<T>(candidates: &[T]) -> Option<&T> {
    candidates.choose(&mut rand::rng())
}
