//! Question endpoints: paginated listing, creation, deletion, and search.

use crate::api_categories::categories_map;
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use trivia_bank::{
    delete_question, get_question, insert_question, list_categories, list_questions,
    search_questions, BankError, NewQuestion, Question,
};

/// Fixed page size for the question listing.
const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Deserialize)]
pub struct ListQuestionsParams {
    /// 1-based page number. Kept as a raw string so that an unparseable
    /// value falls back to page 1 instead of rejecting the request.
    pub page: Option<String>,
}

impl ListQuestionsParams {
    fn resolve_page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(1)
    }
}

/// Slices the full ordered question list to the requested page.
///
/// Pages past the end (and page 0) yield an empty slice, not an error;
/// the handler decides what an empty page means.
fn paginate(questions: &[Question], page: usize) -> &[Question] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(QUESTIONS_PER_PAGE);
    if start >= questions.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(questions.len());
    &questions[start..end]
}

/// Maps a [`BankError`] to the API error surface, logging database faults.
///
/// `QuestionNotFound` → 404; everything else → 500.
fn bank_err_to_api(e: BankError) -> ApiError {
    match e {
        BankError::QuestionNotFound(_) => ApiError::NotFound,
        err => {
            tracing::error!(error = %err, "question operation failed");
            ApiError::Internal
        }
    }
}

/// GET /questions?page=N
///
/// One 10-question page of the id-ordered question list, together with the
/// pre-pagination total, all categories, and `current_category: null`.
/// A page with no questions on it is a 404.
pub async fn list_questions_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ListQuestionsParams>,
) -> Result<Json<Value>, ApiError> {
    let (questions, categories) = tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get db connection for question listing");
            ApiError::NotFound
        })?;
        let questions = list_questions(&conn).map_err(|e| {
            tracing::error!(error = %e, "question listing failed");
            ApiError::NotFound
        })?;
        let categories = list_categories(&conn).map_err(|e| {
            tracing::error!(error = %e, "category listing failed");
            ApiError::NotFound
        })?;
        Ok((questions, categories))
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "question listing task join error");
        ApiError::Internal
    })??;

    let page = paginate(&questions, params.resolve_page());
    if page.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({
        "success": true,
        "questions": page,
        "total_questions": questions.len(),
        "current_category": Value::Null,
        "categories": categories_map(&categories),
    })))
}

/// POST /questions
///
/// Creates a question from a JSON body with all four fields required.
/// Anything short of that — missing body, malformed JSON, missing or
/// mistyped fields, a failed insert — is a 422.
pub async fn create_question_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(new) = payload.map_err(|_| ApiError::Unprocessable)?;

    let created = tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get db connection for question creation");
            ApiError::Unprocessable
        })?;
        insert_question(&conn, &new).map_err(|e| {
            tracing::error!(error = %e, "question insert failed");
            ApiError::Unprocessable
        })
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "question creation task join error");
        ApiError::Internal
    })??;

    Ok(Json(json!({
        "success": true,
        "created": created,
    })))
}

/// DELETE /questions/{question_id}
///
/// Looks the question up first; a missing id is a 404. The lookup and the
/// delete are separate statements with no transaction around them — a
/// concurrent delete of the same id loses the race and gets the 404.
pub async fn delete_question_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(question_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get db connection for question deletion");
            ApiError::Internal
        })?;
        get_question(&conn, question_id).map_err(bank_err_to_api)?;
        delete_question(&conn, question_id).map_err(bank_err_to_api)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "question deletion task join error");
        ApiError::Internal
    })??;

    Ok(Json(json!({
        "success": true,
        "deleted": question_id,
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub search_term: Option<String>,
}

/// POST /questions/search
///
/// Case-insensitive substring match on the question text. Zero matches is
/// still a success, with `total_questions: 0`. A missing or unparseable
/// body is a 404; a body without a usable `searchTerm` is a 400.
pub async fn search_questions_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::NotFound)?;

    let term = match payload.search_term {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ApiError::BadRequest),
    };

    let results = tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get db connection for question search");
            ApiError::NotFound
        })?;
        search_questions(&conn, &term).map_err(|e| {
            tracing::error!(error = %e, "question search failed");
            ApiError::NotFound
        })
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "question search task join error");
        ApiError::Internal
    })??;

    let total_questions = results.len();

    Ok(Json(json!({
        "success": true,
        "questions": results,
        "total_questions": total_questions,
        "current_category": Value::Null,
    })))
}
