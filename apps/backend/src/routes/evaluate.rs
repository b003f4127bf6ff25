//! Answer grading endpoints

use axum::{extract::State, Json};

use crate::config::Limits;
use crate::error::{ApiError, Result};
use crate::models::{
    ChoiceOutcome, ChoiceRequest, EvaluateRequest, EvaluationResult, Question, QuestionGrade,
    QuestionRequest, QuestionResponse,
};
use crate::AppState;
use lesson_core::{grade_choice, grade_question};

/// POST /api/evaluate
/// Grades a free-text answer against the accepted references
pub async fn evaluate(
    State(state): State<AppState>,
    Json(payload): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>> {
    validate_answer(&payload.answer, &payload.references, &state.limits)?;

    let result = state.evaluator.evaluate(
        &payload.answer,
        &payload.references,
        payload.context.as_deref().unwrap_or_default(),
    );

    tracing::debug!(
        score = result.score,
        references = payload.references.len(),
        "evaluated answer"
    );

    Ok(Json(result))
}

/// POST /api/choice
/// Grades a multiple-choice selection
pub async fn choice(Json(payload): Json<ChoiceRequest>) -> Result<Json<ChoiceOutcome>> {
    let outcome = grade_choice(payload.selected, payload.correct, payload.option_count)?;

    tracing::debug!(score = outcome.score, "graded choice");

    Ok(Json(outcome))
}

/// POST /api/question
/// Grades a response to a lesson question of either kind
pub async fn question(
    State(state): State<AppState>,
    Json(payload): Json<QuestionRequest>,
) -> Result<Json<QuestionGrade>> {
    if let (Question::FreeText { expected, .. }, QuestionResponse::Answer(answer)) =
        (&payload.question, &payload.response)
    {
        validate_answer(answer, expected, &state.limits)?;
    }

    let grade = grade_question(&payload.question, &payload.response, &state.evaluator)?;

    tracing::debug!(
        prompt = payload.question.prompt(),
        score = grade.score(),
        "graded question"
    );

    Ok(Json(grade))
}

fn validate_answer(answer: &str, references: &[String], limits: &Limits) -> Result<()> {
    if answer.chars().count() > limits.max_answer_chars {
        return Err(ApiError::BadRequest(format!(
            "answer exceeds {} characters",
            limits.max_answer_chars
        )));
    }

    if references.len() > limits.max_references {
        return Err(ApiError::BadRequest(format!(
            "at most {} references are accepted",
            limits.max_references
        )));
    }

    if references
        .iter()
        .any(|r| r.chars().count() > limits.max_answer_chars)
    {
        return Err(ApiError::BadRequest(format!(
            "reference exceeds {} characters",
            limits.max_answer_chars
        )));
    }

    Ok(())
}
