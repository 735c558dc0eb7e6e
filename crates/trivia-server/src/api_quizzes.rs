//! Quiz endpoint: random question selection with exclusions.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::response::Json;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use trivia_bank::{list_questions, questions_for_category};

#[derive(Deserialize)]
pub struct QuizRequest {
    /// Category to draw from. Absence is a 404, per the contract.
    pub quiz_category: Option<QuizCategory>,
    /// IDs already asked this round. Required: a body without it is a 422.
    pub previous_questions: Vec<i64>,
}

#[derive(Deserialize)]
pub struct QuizCategory {
    pub id: CategoryRef,
    /// Display name; sent by clients but not consulted for selection.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Clients send the category id either as a JSON number or as a numeric
/// string (`{"id": "2"}`). Both are accepted; anything else is a 422.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i64),
    Text(String),
}

impl CategoryRef {
    fn resolve(&self) -> Option<i64> {
        match self {
            CategoryRef::Id(id) => Some(*id),
            CategoryRef::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// POST /quizzes
///
/// Draws one uniformly random question from the chosen category (id 0
/// means all categories), excluding `previous_questions`. An empty
/// candidate set — unknown category, or every question already asked — is
/// a 422, never an empty success: clients rely on the 422 to end a round.
pub async fn play_quiz_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::Unprocessable)?;

    let quiz_category = payload.quiz_category.ok_or(ApiError::NotFound)?;
    let category_id = quiz_category.id.resolve().ok_or(ApiError::Unprocessable)?;
    let previous = payload.previous_questions;

    let candidates = tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get db connection for quiz selection");
            ApiError::Unprocessable
        })?;

        let questions = if category_id == 0 {
            list_questions(&conn)
        } else {
            questions_for_category(&conn, category_id)
        }
        .map_err(|e| {
            tracing::error!(error = %e, "quiz candidate query failed");
            ApiError::Unprocessable
        })?;

        Ok(questions
            .into_iter()
            .filter(|q| !previous.contains(&q.id))
            .collect::<Vec<_>>())
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "quiz selection task join error");
        ApiError::Internal
    })??;

    let question = candidates
        .choose(&mut rand::thread_rng())
        .ok_or(ApiError::Unprocessable)?;

    Ok(Json(json!({ "question": question })))
}
