//! Free-text and multiple-choice grading API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::fixtures;
use common::TestContext;

#[tokio::test]
async fn test_exact_answer_scores_ten() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request("  Buenos días ", &["buenos días"]))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["score"], 10);
    assert!(body.get("suggestion").is_none());
}

#[tokio::test]
async fn test_near_answer_gets_suggestion() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request("¿como estás?", &["¿Cómo estás?"]))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["score"], 9);
    assert_eq!(body["suggestion"], "¿Cómo estás?");
}

#[tokio::test]
async fn test_partial_answer_scores_seven() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request("tengo un gato", &["tengo un perro"]))
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["score"], 7);
    assert_eq!(body["suggestion"], "tengo un perro");
}

#[tokio::test]
async fn test_empty_answer_is_graded_not_rejected() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request("   ", &["hola"]))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["score"], 0);
}

#[tokio::test]
async fn test_references_are_optional() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/evaluate")
        .json(&json!({ "answer": "you are my friend" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["score"], 5);
}

#[tokio::test]
async fn test_oversized_answer_is_rejected() {
    let server = TestContext::new().server();
    let answer = "a".repeat(5_001);

    let response = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request(&answer, &["a"]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_too_many_references_are_rejected() {
    let server = TestContext::new().server();
    let references = vec!["hola"; 51];

    let response = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request("hola", &references))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_choice_right_and_wrong() {
    let server = TestContext::new().server();

    let right = server
        .post("/api/choice")
        .json(&json!({ "selected": 2, "correct": 2, "option_count": 4 }))
        .await;
    right.assert_status_ok();
    right.assert_json(&json!({ "is_correct": true, "score": 10, "correct": 2 }));

    let wrong = server
        .post("/api/choice")
        .json(&json!({ "selected": 0, "correct": 2, "option_count": 4 }))
        .await;
    wrong.assert_json(&json!({ "is_correct": false, "score": 0, "correct": 2 }));
}

#[tokio::test]
async fn test_choice_out_of_range() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/choice")
        .json(&json!({ "selected": 4, "correct": 1, "option_count": 4 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "lesson_error");
}

#[tokio::test]
async fn test_question_multiple_choice() {
    let server = TestContext::new().server();
    let question = json!({
        "type": "multiple_choice",
        "prompt": "¿Cómo se dice 'obrigado'?",
        "options": ["gracias", "obrigado", "por favor"],
        "correct": 0
    });

    let right = server
        .post("/api/question")
        .json(&json!({ "question": question, "response": { "selected": 0 } }))
        .await;
    right.assert_status_ok();
    right.assert_json(&json!({ "is_correct": true, "score": 10, "correct": 0 }));

    let wrong = server
        .post("/api/question")
        .json(&json!({ "question": question, "response": { "selected": 2 } }))
        .await;
    wrong.assert_json(&json!({ "is_correct": false, "score": 0, "correct": 0 }));
}

#[tokio::test]
async fn test_question_free_text_uses_expected_answers() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/question")
        .json(&json!({
            "question": {
                "type": "free_text",
                "prompt": "Pregunta a tu amigo cómo está",
                "expected": ["¿Cómo estás?"]
            },
            "response": { "answer": "¿como estás?" }
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["score"], 9);
    assert_eq!(body["suggestion"], "¿Cómo estás?");
}

#[tokio::test]
async fn test_question_rejects_mismatched_response() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/question")
        .json(&json!({
            "question": {
                "type": "free_text",
                "prompt": "Saluda a tu profesora",
                "expected": ["hola profesora"]
            },
            "response": { "selected": 1 }
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "lesson_error");
}
