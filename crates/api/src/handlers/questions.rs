//! Handlers for the trivia question collection: paging, creation, deletion
//! and search.

use std::collections::BTreeMap;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use brewquiz_core::pagination::{paginate, parse_page, QUESTIONS_PER_PAGE};
use brewquiz_core::scalar::{expect_small_int, expect_text, Scalar};
use brewquiz_core::types::DbId;
use brewquiz_db::models::category::category_map;
use brewquiz_db::models::question::{NewQuestion, Question};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TriviaError, TriviaResult};
use crate::response::Success;
use crate::state::TriviaState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: BTreeMap<DbId, String>,
    pub current_category: Option<String>,
}

/// Body of `POST /questions`. Fields stay untyped until presence is checked,
/// so a missing field (422) is distinguishable from a wrongly typed one (400).
#[derive(Debug, Default, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(default)]
    pub question: Option<Value>,
    #[serde(default)]
    pub answer: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub difficulty: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CreatedQuestion {
    pub created: DbId,
}

#[derive(Debug, Serialize)]
pub struct DeletedQuestion {
    /// The id exactly as it appeared in the path.
    pub deleted: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /questions?page=N
///
/// Ten questions per page plus the unpaginated total and every category.
/// The query never fails the request: the first `page` value wins, and an
/// unreadable query string means page 1.
pub async fn list_questions(
    State(state): State<TriviaState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> TriviaResult<impl IntoResponse> {
    let (questions, categories) = state.store.list_questions_with_categories().await?;
    let page = parse_page(first_page_param(query).as_deref());
    let window = paginate(&questions, page, QUESTIONS_PER_PAGE);

    tracing::debug!(page, total = questions.len(), returned = window.len(), "Listed questions");

    Ok(Success::new(QuestionPage {
        questions: window.to_vec(),
        total_questions: questions.len(),
        categories: category_map(&categories),
        current_category: None,
    }))
}

/// POST /questions
///
/// All four fields are required (422 when any is missing). Values the store
/// cannot accept, or a failed insert, produce 400.
pub async fn create_question(
    State(state): State<TriviaState>,
    body: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> TriviaResult<impl IntoResponse> {
    let Json(input) = body?;
    let question = required("question", input.question)?;
    let answer = required("answer", input.answer)?;
    let category = required("category", input.category)?;
    let difficulty = required("difficulty", input.difficulty)?;

    let new_question = to_new_question(&question, &answer, &category, &difficulty)
        .map_err(|e| TriviaError::BadRequest(e.to_string()))?;

    let created = state
        .store
        .create_question(&new_question)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Question insert failed");
            TriviaError::BadRequest(e.to_string())
        })?;

    tracing::info!(question_id = created.id, category = %created.category, "Question created");

    Ok(Success::new(CreatedQuestion { created: created.id }))
}

/// DELETE /questions/{id}
///
/// A non-numeric or unknown id is a 400, not a 404.
pub async fn delete_question(
    State(state): State<TriviaState>,
    path: Result<Path<String>, PathRejection>,
) -> TriviaResult<impl IntoResponse> {
    let Path(raw_id) = path.map_err(|e| TriviaError::BadRequest(e.body_text()))?;
    let id: DbId = raw_id
        .parse()
        .map_err(|_| TriviaError::BadRequest(format!("'{raw_id}' is not a question id")))?;

    let deleted = state.store.delete_question(id).await.map_err(|e| {
        tracing::warn!(question_id = id, error = %e, "Question delete failed");
        TriviaError::BadRequest(e.to_string())
    })?;

    if !deleted {
        return Err(TriviaError::BadRequest(format!("Question {id} does not exist")));
    }

    tracing::info!(question_id = id, "Question deleted");

    Ok(Success::new(DeletedQuestion { deleted: raw_id }))
}

/// POST /questions/search
///
/// Case-insensitive substring search on the question text.
pub async fn search_questions(
    State(state): State<TriviaState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> TriviaResult<impl IntoResponse> {
    let Json(input) = body?;
    let term = input
        .search_term
        .filter(|t| !t.is_empty())
        .ok_or_else(|| TriviaError::Unprocessable("searchTerm is required".into()))?;

    let questions = state.store.search_questions(&term).await.map_err(|e| {
        tracing::error!(error = %e, "Question search failed");
        TriviaError::Unprocessable(e.to_string())
    })?;

    tracing::debug!(term = %term, matches = questions.len(), "Searched questions");

    Ok(Success::new(SearchResults {
        total_questions: questions.len(),
        questions,
        current_category: None,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn first_page_param(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Option<String> {
    let Query(pairs) = query.ok()?;
    pairs
        .into_iter()
        .find_map(|(key, value)| (key == "page").then_some(value))
}

fn required(field: &str, value: Option<Value>) -> TriviaResult<Value> {
    value.ok_or_else(|| TriviaError::Unprocessable(format!("{field} is required")))
}

fn to_new_question(
    question: &Value,
    answer: &Value,
    category: &Value,
    difficulty: &Value,
) -> Result<NewQuestion, brewquiz_core::error::CoreError> {
    Ok(NewQuestion {
        question: expect_text("question", question)?,
        answer: expect_text("answer", answer)?,
        category: Scalar::from_value(category)?.into_text(),
        difficulty: expect_small_int("difficulty", difficulty)?,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn question_fields_are_normalized() {
        let q = to_new_question(&json!("Q?"), &json!("A"), &json!(3), &json!("2")).unwrap();
        assert_eq!(q.category, "3");
        assert_eq!(q.difficulty, 2);
    }

    #[test]
    fn wrongly_typed_fields_are_rejected() {
        assert_matches!(
            to_new_question(&json!("Q?"), &json!("A"), &json!("1"), &json!("hard")),
            Err(_)
        );
        assert_matches!(
            to_new_question(&json!(42), &json!("A"), &json!("1"), &json!(1)),
            Err(_)
        );
    }

    #[test]
    fn null_fields_count_as_missing() {
        let input: CreateQuestionRequest =
            serde_json::from_value(json!({"question": null, "answer": "A"})).unwrap();
        assert!(input.question.is_none());
        assert_matches!(required("question", input.question), Err(TriviaError::Unprocessable(_)));
    }
}
