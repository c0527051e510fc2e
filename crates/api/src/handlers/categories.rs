//! Handlers for trivia categories.

use std::collections::BTreeMap;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use brewquiz_core::types::DbId;
use brewquiz_db::models::category::category_map;
use brewquiz_db::models::question::Question;
use serde::Serialize;

use crate::error::{TriviaError, TriviaResult};
use crate::response::Success;
use crate::state::TriviaState;

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categories: BTreeMap<DbId, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

/// GET /categories
pub async fn list_categories(
    State(state): State<TriviaState>,
) -> TriviaResult<impl IntoResponse> {
    let categories = state.store.list_categories().await?;
    Ok(Success::new(CategoryList {
        categories: category_map(&categories),
    }))
}

/// GET /categories/{category_id}/questions
///
/// The path segment must be an integer; anything else is an unknown route.
/// An unknown category yields an empty list, not a 404.
pub async fn list_questions_in_category(
    State(state): State<TriviaState>,
    path: Result<Path<String>, PathRejection>,
) -> TriviaResult<impl IntoResponse> {
    let Path(raw_id) = path.map_err(|e| TriviaError::NotFound(e.body_text()))?;
    raw_id
        .parse::<DbId>()
        .map_err(|_| TriviaError::NotFound(format!("'{raw_id}' is not a category id")))?;

    let questions = state
        .store
        .questions_in_category(&raw_id)
        .await
        .map_err(|e| TriviaError::NotFound(e.to_string()))?;

    Ok(Success::new(CategoryQuestions {
        total_questions: questions.len(),
        questions,
        current_category: raw_id,
    }))
}
