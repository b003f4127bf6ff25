//! Backup export and import endpoints

use axum::{
    extract::State,
    http::header::CONTENT_DISPOSITION,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use serde_json::Value;

use crate::error::Result;
use crate::models::{BackupStatusResponse, GradeRecord, ImportResponse, ProgressSnapshot};
use crate::routes::auth::AuthenticatedLearner;
use crate::AppState;
use lesson_core::{needs_backup, parse_backup_value, BackupDocument};

/// GET /api/backup
/// Downloads progress and settings, and marks the backup as done
pub async fn export(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
) -> Result<Response> {
    let meta = state.store.meta(auth.learner_id).await?;
    let book = state.store.grade_book(auth.learner_id).await?;
    let grade_count = book.len();
    let now = Utc::now();

    let document = BackupDocument::new(
        ProgressSnapshot {
            current_lesson: meta.current_lesson.max(1) as u32,
            grades: book.into_grades(),
            saved_at: Some(now),
        },
        meta.settings,
        now,
    );

    state.store.mark_backup(auth.learner_id, grade_count).await?;

    tracing::info!(learner_id = %auth.learner_id, grade_count, "exported backup");

    let disposition = format!("attachment; filename=\"{}\"", document.file_name());
    Ok(([(CONTENT_DISPOSITION, disposition)], Json(document)).into_response())
}

/// POST /api/backup
/// Replaces progress with the content of a backup file
pub async fn import(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Json(payload): Json<Value>,
) -> Result<Json<ImportResponse>> {
    let mut backup = parse_backup_value(payload, Utc::now())?;
    backup.progress.grades = std::mem::take(&mut backup.progress.grades)
        .into_iter()
        .map(|g| GradeRecord::new(g.lesson, g.label, g.score, g.recorded_at))
        .collect();

    let current_lesson = backup.progress.current_lesson;
    let imported_grades = backup.progress.grades.len();

    state.store.restore_backup(auth.learner_id, backup).await?;

    tracing::info!(
        learner_id = %auth.learner_id,
        current_lesson,
        imported_grades,
        "imported backup"
    );

    Ok(Json(ImportResponse {
        success: true,
        current_lesson,
        imported_grades,
    }))
}

/// GET /api/backup/status
pub async fn status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
) -> Result<Json<BackupStatusResponse>> {
    let meta = state.store.meta(auth.learner_id).await?;
    let total = state.store.grade_book(auth.learner_id).await?.len();
    let last_backup = meta.last_backup_grade_count.max(0) as usize;

    Ok(Json(BackupStatusResponse {
        should_backup: needs_backup(total, last_backup),
        grades_since_backup: total.saturating_sub(last_backup),
    }))
}
