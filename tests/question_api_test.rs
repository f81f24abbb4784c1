mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use common::{count_rows, generator_replying, test_pool, MockGenerator, MODEL_REPLY};
use math_tutor_backend::{middleware::cors::cors_layer, routes::app_router, AppState};
use serde_json::{json, Value as JsonValue};
use sqlx::SqlitePool;
use tower::ServiceExt;

fn app(pool: SqlitePool, generator: MockGenerator) -> Router {
    let state = AppState::new(pool, Arc::new(generator));
    app_router(state, cors_layer("http://localhost:5173").expect("cors"))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn create_algebra_question(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/questions",
        Some(json!({"topic": "algebra", "difficulty": "intermediate"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["id"].as_i64().expect("id")
}

#[tokio::test]
async fn generate_then_grade_tracks_success_rate() {
    let pool = test_pool().await;
    let mut generator = MockGenerator::new();
    generator
        .expect_generate_content()
        .withf(|prompt: &str| prompt.contains("intermediate level algebra"))
        .times(1)
        .returning(|_| Ok(MODEL_REPLY.to_string()));
    let app = app(pool.clone(), generator);

    let (status, question) = send(
        &app,
        "POST",
        "/questions",
        Some(json!({"topic": "algebra", "difficulty": "intermediate"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(question["question_text"], "Solve for x: 4x + 6 = 26");
    assert_eq!(question["options"].as_array().unwrap().len(), 4);
    assert_eq!(question["options"][0], json!({"text": "x = 5", "is_correct": true}));
    assert_eq!(question["solution_steps"][1], "2. Divide both sides by 4: x = 5");
    let id = question["id"].as_i64().unwrap();

    let (status, stats) = send(&app, "GET", &format!("/questions/{}/stats", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_attempts"], 0);
    assert_eq!(stats["success_rate"].as_f64(), Some(0.0));

    let (status, graded) = send(
        &app,
        "POST",
        "/submit",
        Some(json!({"question_id": id, "selected_answer": "x = 5"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(graded["is_correct"], true);
    assert_eq!(graded["solution_steps"], question["solution_steps"]);
    assert_eq!(graded["explanation"], question["explanation"]);
    assert_eq!(graded["performance_stats"]["total_attempts"], 1);
    assert_eq!(graded["performance_stats"]["correct_attempts"], 1);
    assert_eq!(graded["performance_stats"]["success_rate"].as_f64(), Some(100.0));

    let (_, graded) = send(
        &app,
        "POST",
        "/submit",
        Some(json!({"question_id": id, "selected_answer": "x = 7"})),
    )
    .await;
    assert_eq!(graded["is_correct"], false);
    assert_eq!(graded["performance_stats"]["total_attempts"], 2);
    assert_eq!(graded["performance_stats"]["correct_attempts"], 1);
    assert_eq!(graded["performance_stats"]["success_rate"].as_f64(), Some(50.0));

    let (_, first) = send(&app, "GET", &format!("/questions/{}/stats", id), None).await;
    let (_, second) = send(&app, "GET", &format!("/questions/{}/stats", id), None).await;
    assert_eq!(first, second);
    assert_eq!(first["total_attempts"], 2);
    assert_eq!(count_rows(&pool, "student_attempts").await, 2);
}

#[tokio::test]
async fn submission_uses_exact_match() {
    let pool = test_pool().await;
    let app = app(pool, generator_replying(MODEL_REPLY));
    let id = create_algebra_question(&app).await;

    for near_miss in ["x=5", "X = 5", " x = 5", "5"] {
        let (status, graded) = send(
            &app,
            "POST",
            "/submit",
            Some(json!({"question_id": id, "selected_answer": near_miss})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(graded["is_correct"], false, "{:?} must not match", near_miss);
    }
}

#[tokio::test]
async fn unknown_question_is_not_found_and_writes_nothing() {
    let pool = test_pool().await;
    let app = app(pool.clone(), MockGenerator::new());

    let (status, body) = send(
        &app,
        "POST",
        "/submit",
        Some(json!({"question_id": 4242, "selected_answer": "x = 5"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "question_not_found");
    assert_eq!(count_rows(&pool, "student_attempts").await, 0);

    let (status, _) = send(&app, "GET", "/questions/4242/stats", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unusable_model_output_creates_no_question() {
    let two_correct = MODEL_REPLY.replace(
        r#"{"text": "x = 4", "is_correct": false}"#,
        r#"{"text": "x = 4", "is_correct": true}"#,
    );
    let missing_explanation = r#"{"question": "1 + 1?", "options": [{"text": "2", "is_correct": true}, {"text": "3", "is_correct": false}], "solution_steps": []}"#;
    let duplicate_options = r#"{"question": "1 + 1?", "options": [{"text": "2", "is_correct": true}, {"text": "2", "is_correct": false}], "solution_steps": [], "explanation": "Add."}"#;

    let cases: Vec<(String, &str)> = vec![
        ("I'm sorry, I can't do that.".to_string(), "extraction_error"),
        ("{\"question\": \"1 + 1?\",".to_string(), "extraction_error"),
        ("{\"question\": oops}".to_string(), "malformed_response"),
        (missing_explanation.to_string(), "invalid_question_format"),
        (two_correct, "invalid_question_format"),
        (duplicate_options.to_string(), "invalid_question_format"),
    ];

    let pool = test_pool().await;
    for (reply, kind) in cases {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate_content()
            .times(1)
            .returning(move |_| Ok(reply.clone()));
        let app = app(pool.clone(), generator);

        let (status, body) = send(
            &app,
            "POST",
            "/questions",
            Some(json!({"topic": "geometry", "difficulty": "beginner"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["kind"], kind, "{}", body);
        assert!(body["error"].is_string());
    }

    assert_eq!(count_rows(&pool, "questions").await, 0);
}

#[tokio::test]
async fn generation_failure_is_reported_as_upstream_error() {
    let pool = test_pool().await;
    let mut generator = MockGenerator::new();
    generator.expect_generate_content().times(1).returning(|_| {
        Err(math_tutor_backend::error::Error::Generation(
            "Empty response from AI model".to_string(),
        ))
    });
    let app = app(pool.clone(), generator);

    let (status, body) = send(
        &app,
        "POST",
        "/questions",
        Some(json!({"topic": "calculus", "difficulty": "advanced"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "generation_error");
    assert_eq!(count_rows(&pool, "questions").await, 0);
}

#[tokio::test]
async fn invalid_input_is_rejected_before_generation() {
    let pool = test_pool().await;
    let mut generator = MockGenerator::new();
    generator.expect_generate_content().never();
    let app = app(pool, generator);

    for body in [
        json!({"topic": "astrology", "difficulty": "beginner"}),
        json!({"topic": "algebra", "difficulty": "expert"}),
        json!({"topic": "algebra"}),
    ] {
        let (status, resp) = send(&app, "POST", "/questions", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(resp["kind"], "invalid_input");
    }

    let (status, resp) = send(
        &app,
        "POST",
        "/submit",
        Some(json!({"question_id": "one", "selected_answer": "x = 5"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["kind"], "invalid_input");
}

#[tokio::test]
async fn long_answers_are_graded_and_recorded() {
    let pool = test_pool().await;
    let app = app(pool.clone(), generator_replying(MODEL_REPLY));
    let id = create_algebra_question(&app).await;

    let (status, resp) = send(
        &app,
        "POST",
        "/submit",
        Some(json!({"question_id": id, "selected_answer": "y".repeat(5000)})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", resp);
    assert_eq!(resp["is_correct"], false);
    assert_eq!(resp["performance_stats"]["total_attempts"], 1);
    assert_eq!(count_rows(&pool, "student_attempts").await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_all_land() {
    let pool = test_pool().await;
    let app = app(pool.clone(), generator_replying(MODEL_REPLY));
    let id = create_algebra_question(&app).await;

    let handles: Vec<_> = (0..40)
        .map(|i| {
            let app = app.clone();
            let answer = if i % 2 == 0 { "x = 5" } else { "x = 7" };
            tokio::spawn(async move {
                send(
                    &app,
                    "POST",
                    "/submit",
                    Some(json!({"question_id": id, "selected_answer": answer})),
                )
                .await
            })
        })
        .collect();

    for handle in handles {
        let (status, resp) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK, "{}", resp);
    }

    let (status, stats) = send(&app, "GET", &format!("/questions/{}/stats", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_attempts"], 40);
    assert_eq!(stats["correct_attempts"], 20);
    assert_eq!(stats["success_rate"], 50.0);
    assert_eq!(count_rows(&pool, "student_attempts").await, 40);
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let pool = test_pool().await;
    let app = app(pool, MockGenerator::new());

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/submit"]["post"].is_object());
    assert!(doc["paths"]["/questions"]["post"].is_object());
}
