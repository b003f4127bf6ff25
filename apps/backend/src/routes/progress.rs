//! Progress endpoints

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::models::{GradeView, ProgressResponse, SetLessonRequest};
use crate::routes::auth::AuthenticatedLearner;
use crate::AppState;
use lesson_core::progress::RECENT_LIMIT;

/// GET /api/progress
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
) -> Result<Json<ProgressResponse>> {
    let meta = state.store.meta(auth.learner_id).await?;
    let book = state.store.grade_book(auth.learner_id).await?;

    Ok(Json(ProgressResponse {
        current_lesson: meta.current_lesson.max(1) as u32,
        summary: book.summary(),
        recent: book
            .recent(RECENT_LIMIT)
            .into_iter()
            .map(GradeView::from)
            .collect(),
    }))
}

/// PUT /api/progress/lesson
pub async fn set_lesson(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Json(payload): Json<SetLessonRequest>,
) -> Result<StatusCode> {
    if payload.lesson == 0 {
        return Err(ApiError::BadRequest("lessons are numbered from 1".to_string()));
    }

    state
        .store
        .set_current_lesson(auth.learner_id, payload.lesson)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/progress/settings
/// Stores the client's settings object as-is
pub async fn set_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Json(settings): Json<Value>,
) -> Result<StatusCode> {
    if !settings.is_object() {
        return Err(ApiError::BadRequest("settings must be a JSON object".to_string()));
    }

    state.store.set_settings(auth.learner_id, settings).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/progress
/// Removes every grade and returns to the first lesson
pub async fn clear(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
) -> Result<StatusCode> {
    state.store.clear_progress(auth.learner_id).await?;

    tracing::info!(learner_id = %auth.learner_id, "cleared progress");

    Ok(StatusCode::NO_CONTENT)
}
