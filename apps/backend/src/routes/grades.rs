//! Grade recording endpoint

use axum::{extract::State, Extension, Json};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::{GradeRecord, GradeView, RecordGradeRequest, RecordGradeResponse};
use crate::routes::auth::AuthenticatedLearner;
use crate::AppState;
use lesson_core::grading::FULL_MARKS;
use lesson_core::needs_backup;

/// POST /api/grades
/// Records a grade, replacing an earlier one for the same lesson and label
pub async fn record(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Json(payload): Json<RecordGradeRequest>,
) -> Result<Json<RecordGradeResponse>> {
    if payload.score > FULL_MARKS {
        return Err(ApiError::BadRequest(format!(
            "score must be between 0 and {FULL_MARKS}"
        )));
    }

    let label = payload.label.trim();
    if label.is_empty() {
        return Err(ApiError::BadRequest("label must not be empty".to_string()));
    }

    let grade = GradeRecord::new(payload.lesson, label, payload.score, Utc::now());
    state.store.record_grade(auth.learner_id, grade.clone()).await?;

    let total = state.store.grade_book(auth.learner_id).await?.len();
    let meta = state.store.meta(auth.learner_id).await?;
    let should_backup = needs_backup(total, meta.last_backup_grade_count.max(0) as usize);

    tracing::info!(
        learner_id = %auth.learner_id,
        lesson = grade.lesson,
        score = grade.score,
        total,
        "recorded grade"
    );

    Ok(Json(RecordGradeResponse {
        grade: GradeView::from(&grade),
        should_backup,
    }))
}
