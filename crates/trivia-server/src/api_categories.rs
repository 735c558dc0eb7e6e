//! Category endpoints.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Extension, Path};
use axum::response::Json;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use trivia_bank::{list_categories, questions_for_category, Category};

/// Builds the id→name object used by the category and question listings.
pub(crate) fn categories_map(categories: &[Category]) -> Value {
    let mut map = Map::new();
    for category in categories {
        map.insert(category.id.to_string(), Value::String(category.kind.clone()));
    }
    Value::Object(map)
}

/// GET /categories
///
/// All categories ordered by display name, as an id→name object. An empty
/// table and a query failure are both 404: this endpoint makes no
/// distinction between "nothing there" and "could not look".
pub async fn get_categories_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let categories = tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get db connection for categories");
            ApiError::NotFound
        })?;
        list_categories(&conn).map_err(|e| {
            tracing::error!(error = %e, "category listing failed");
            ApiError::NotFound
        })
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "categories task join error");
        ApiError::Internal
    })??;

    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({
        "success": true,
        "categories": categories_map(&categories),
    })))
}

/// GET /categories/{category_id}/questions
///
/// All questions in the category, ordered by id. Zero matches is a 404.
///
/// `current_category` is the raw list of per-row category values, and the
/// body carries no `success` key — both preserved from the contract this
/// service replaces.
pub async fn category_questions_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(category_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let questions = tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get db connection for category questions");
            ApiError::NotFound
        })?;
        questions_for_category(&conn, category_id).map_err(|e| {
            tracing::error!(error = %e, "category question listing failed");
            ApiError::NotFound
        })
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "category questions task join error");
        ApiError::Internal
    })??;

    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    let current_category: Vec<i64> = questions.iter().map(|q| q.category).collect();
    let total_questions = questions.len();

    Ok(Json(json!({
        "questions": questions,
        "total_questions": total_questions,
        "current_category": current_category,
    })))
}
