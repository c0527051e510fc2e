//! Quiz round handler: one random unseen question per request.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use brewquiz_core::quiz::{pick_random, QuizCategory};
use brewquiz_core::types::DbId;
use brewquiz_db::models::question::Question;
use serde::{Deserialize, Serialize};

use crate::error::{TriviaError, TriviaResult};
use crate::response::Success;
use crate::state::TriviaState;

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub previous_questions: Vec<DbId>,
    pub quiz_category: QuizCategory,
}

#[derive(Debug, Serialize)]
pub struct QuizQuestion {
    /// `null` once every candidate has been played.
    pub question: Option<Question>,
}

/// POST /quizzes
pub async fn next_question(
    State(state): State<TriviaState>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> TriviaResult<impl IntoResponse> {
    let Json(input) = body?;
    let category = input
        .quiz_category
        .category_filter()
        .map_err(|e| TriviaError::Unprocessable(e.to_string()))?;

    let candidates = state
        .store
        .quiz_candidates(category.as_deref(), &input.previous_questions)
        .await
        .map_err(|e| TriviaError::Unprocessable(e.to_string()))?;

    let question = pick_random(&candidates).cloned();

    tracing::debug!(
        category = ?category,
        played = input.previous_questions.len(),
        remaining = candidates.len(),
        "Picked quiz question",
    );

    Ok(Success::new(QuizQuestion { question }))
}
