use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;
use trivia_bank::{insert_question, list_questions, NewQuestion};
use trivia_db::{create_pool, run_migrations, DbPool, DbRuntimeSettings};
use trivia_server::{app, AppState};

fn setup_app() -> (axum::Router, DbPool, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("trivia_test.db");
    let pool = create_pool(db_path.to_str().unwrap(), DbRuntimeSettings::default()).unwrap();
    {
        let conn = pool.get().unwrap();
        run_migrations(&conn).unwrap();
    }
    (app(AppState { pool: pool.clone() }), pool, dir)
}

fn seed_questions(pool: &DbPool, count: usize) -> Vec<i64> {
    let conn = pool.get().unwrap();
    (0..count)
        .map(|i| {
            insert_question(
                &conn,
                &NewQuestion {
                    question: format!("seeded question {i}?"),
                    answer: format!("answer {i}"),
                    difficulty: 1,
                    category: 1 + (i as i64 % 6),
                },
            )
            .unwrap()
        })
        .collect()
}

fn question_count(pool: &DbPool) -> usize {
    let conn = pool.get().unwrap();
    list_questions(&conn).unwrap().len()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn list_questions_first_page_holds_ten() {
    let (app, pool, _dir) = setup_app();
    seed_questions(&pool, 12);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/questions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["questions"].as_array().unwrap().len(), 10);
    assert_eq!(json["total_questions"], 12);
    assert!(json["current_category"].is_null());
    assert_eq!(json["categories"].as_object().unwrap().len(), 6);
}

#[tokio::test]
async fn list_questions_last_page_is_shorter() {
    let (app, pool, _dir) = setup_app();
    let ids = seed_questions(&pool, 12);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/questions?page=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let questions = json["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    // The listing is id-ordered, so page 2 starts at the 11th id.
    assert_eq!(questions[0]["id"], ids[10]);
    assert_eq!(json["total_questions"], 12);
}

#[tokio::test]
async fn list_questions_page_past_the_end_is_404() {
    let (app, pool, _dir) = setup_app();
    seed_questions(&pool, 12);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/questions?page=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "resource not found");
}

#[tokio::test]
async fn list_questions_invalid_page_defaults_to_first() {
    let (app, pool, _dir) = setup_app();
    seed_questions(&pool, 12);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/questions?page=two")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["questions"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn delete_question_removes_it() {
    let (app, pool, _dir) = setup_app();
    let ids = seed_questions(&pool, 3);
    let target = ids[1];

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/questions/{target}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["deleted"], target);

    assert_eq!(question_count(&pool), 2);
}

#[tokio::test]
async fn delete_missing_question_is_404() {
    let (app, pool, _dir) = setup_app();
    seed_questions(&pool, 1);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/questions/999999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], 404);
    assert_eq!(json["message"], "resource not found");

    assert_eq!(question_count(&pool), 1);
}

#[tokio::test]
async fn create_question_assigns_new_id() {
    let (app, pool, _dir) = setup_app();
    seed_questions(&pool, 2);

    let body = serde_json::json!({
        "question": "what is the sun color?",
        "answer": "yellow",
        "difficulty": 1,
        "category": 5
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/questions")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let created = json["created"].as_i64().unwrap();
    assert!(created > 0);

    assert_eq!(question_count(&pool), 3);
}

#[tokio::test]
async fn create_question_with_no_body_is_422() {
    let (app, pool, _dir) = setup_app();
    seed_questions(&pool, 2);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/questions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], 422);
    assert_eq!(json["message"], "uprocessable");

    assert_eq!(question_count(&pool), 2);
}

#[tokio::test]
async fn create_question_with_missing_field_is_422() {
    let (app, pool, _dir) = setup_app();

    let body = serde_json::json!({
        "question": "incomplete?",
        "difficulty": 1,
        "category": 5
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/questions")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(question_count(&pool), 0);
}

#[tokio::test]
async fn created_question_round_trips_through_listing() {
    let (app, _pool, _dir) = setup_app();

    let body = serde_json::json!({
        "question": "Which planet has the most moons?",
        "answer": "Saturn",
        "difficulty": 3,
        "category": 1
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/questions")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await["created"].as_i64().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/questions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let fetched = json["questions"]
        .as_array()
        .unwrap()
        .iter()
        .find(|q| q["id"] == created)
        .expect("created question should appear in the listing");

    assert_eq!(fetched["question"], "Which planet has the most moons?");
    assert_eq!(fetched["answer"], "Saturn");
    assert_eq!(fetched["difficulty"], 3);
    assert_eq!(fetched["category"], 1);
}
