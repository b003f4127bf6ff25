//! Grade recording and progress API tests.

mod common;

use axum::http::{header::AUTHORIZATION, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::fixtures;
use common::TestContext;

#[tokio::test]
async fn test_progress_starts_empty() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_learner(None).await;

    let response = server
        .get("/api/progress")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "current_lesson": 1,
        "summary": { "average": null, "completed_lessons": 0, "total_grades": 0 },
        "recent": [],
    }));
}

#[tokio::test]
async fn test_record_grade_returns_band() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_learner(None).await;

    let body = TestContext::record_grade(&server, &token, 2, "Questão 1", 6).await;

    assert_eq!(body["grade"]["lesson"], 2);
    assert_eq!(body["grade"]["label"], "Questão 1");
    assert_eq!(body["grade"]["band"], "medium");
    assert_eq!(body["should_backup"], false);
}

#[tokio::test]
async fn test_regrading_replaces_previous_grade() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_learner(None).await;

    TestContext::record_grade(&server, &token, 1, "Questão 1", 0).await;
    TestContext::record_grade(&server, &token, 1, "Questão 2", 7).await;
    TestContext::record_grade(&server, &token, 1, "Questão 1", 10).await;
    TestContext::record_grade(&server, &token, 2, "Questão 1", 8).await;

    let response = server
        .get("/api/progress")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["summary"]["total_grades"], 3);
    assert_eq!(body["summary"]["completed_lessons"], 2);
    assert_eq!(body["summary"]["average"], 8.3);

    let recent = body["recent"].as_array().unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0]["lesson"], 2);
    assert_eq!(recent[0]["band"], "high");
}

#[tokio::test]
async fn test_invalid_grades_are_rejected() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_learner(None).await;
    let auth = TestContext::auth_header_value(&token);

    let too_high = server
        .post("/api/grades")
        .add_header(AUTHORIZATION, auth.clone())
        .json(&fixtures::grade_request(1, "Questão 1", 11))
        .await;
    too_high.assert_status(StatusCode::BAD_REQUEST);

    let blank_label = server
        .post("/api/grades")
        .add_header(AUTHORIZATION, auth)
        .json(&fixtures::grade_request(1, "  ", 5))
        .await;
    blank_label.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_grades_require_auth() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/grades")
        .json(&fixtures::grade_request(1, "Questão 1", 5))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_set_current_lesson() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_learner(None).await;
    let auth = TestContext::auth_header_value(&token);

    server
        .put("/api/progress/lesson")
        .add_header(AUTHORIZATION, auth.clone())
        .json(&json!({ "lesson": 7 }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .put("/api/progress/lesson")
        .add_header(AUTHORIZATION, auth.clone())
        .json(&json!({ "lesson": 0 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = server
        .get("/api/progress")
        .add_header(AUTHORIZATION, auth)
        .await
        .json();
    assert_eq!(body["current_lesson"], 7);
}

#[tokio::test]
async fn test_settings_must_be_an_object() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_learner(None).await;
    let auth = TestContext::auth_header_value(&token);

    server
        .put("/api/progress/settings")
        .add_header(AUTHORIZATION, auth.clone())
        .json(&json!({ "voice": "es-MX" }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .put("/api/progress/settings")
        .add_header(AUTHORIZATION, auth)
        .json(&json!(["es-MX"]))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clear_progress() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_learner(None).await;
    let auth = TestContext::auth_header_value(&token);

    TestContext::record_grade(&server, &token, 3, "Questão 1", 9).await;
    server
        .put("/api/progress/lesson")
        .add_header(AUTHORIZATION, auth.clone())
        .json(&json!({ "lesson": 3 }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete("/api/progress")
        .add_header(AUTHORIZATION, auth.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body: serde_json::Value = server
        .get("/api/progress")
        .add_header(AUTHORIZATION, auth)
        .await
        .json();
    assert_eq!(body["current_lesson"], 1);
    assert_eq!(body["summary"]["total_grades"], 0);
}

#[tokio::test]
async fn test_learners_do_not_share_progress() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, ana) = ctx.create_test_learner(Some("Ana")).await;
    let (_, luis) = ctx.create_test_learner(Some("Luis")).await;

    TestContext::record_grade(&server, &ana, 1, "Questão 1", 9).await;

    let body: serde_json::Value = server
        .get("/api/progress")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&luis))
        .await
        .json();
    assert_eq!(body["summary"]["total_grades"], 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_record_and_read_grades_postgres() {
    let ctx = TestContext::postgres().await;
    let server = ctx.server();
    let (learner_id, token) = ctx.create_test_learner(None).await;

    TestContext::record_grade(&server, &token, 1, "Questão 1", 4).await;
    TestContext::record_grade(&server, &token, 1, "Questão 1", 9).await;

    let body: serde_json::Value = server
        .get("/api/progress")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .await
        .json();
    assert_eq!(body["summary"]["total_grades"], 1);
    assert_eq!(body["recent"][0]["score"], 9);

    ctx.cleanup_learner(learner_id).await;
}
