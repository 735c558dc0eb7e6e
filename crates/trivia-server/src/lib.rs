//! Trivia server library logic.

pub mod api_categories;
pub mod api_questions;
pub mod api_quizzes;
pub mod config;
pub mod error;
pub mod middleware;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use trivia_db::DbPool;

/// Application state shared across all request handlers.
///
/// The pool is the only cross-request resource; handlers hold no other
/// shared state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
}

/// Maximum request body size (64 KiB). Question payloads are tiny; anything
/// larger is rejected before parsing.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Health check handler.
///
/// Returns `200 OK` with server status and version. Used by load balancers,
/// monitoring, and CI to verify the server is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/categories", get(api_categories::get_categories_handler))
        .route(
            "/categories/{category_id}/questions",
            get(api_categories::category_questions_handler),
        )
        .route(
            "/questions",
            get(api_questions::list_questions_handler)
                .post(api_questions::create_question_handler),
        )
        .route(
            "/questions/{question_id}",
            delete(api_questions::delete_question_handler),
        )
        .route(
            "/questions/search",
            post(api_questions::search_questions_handler),
        )
        .route("/quizzes", post(api_quizzes::play_quiz_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::middleware::from_fn(
            middleware::cors_headers_middleware,
        ))
        .layer(Extension(Arc::new(state)))
}
