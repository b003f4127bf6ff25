//! Learner registration and status endpoints

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::{LearnerRegisterRequest, LearnerRegisterResponse, LearnerStatusResponse};
use crate::routes::auth::AuthenticatedLearner;
use crate::AppState;

/// POST /api/learner/register
/// Creates a new learner and returns its token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Option<LearnerRegisterRequest>>,
) -> Result<Json<LearnerRegisterResponse>> {
    let name = payload.and_then(|p| p.name);
    let learner = state.store.create_learner(name.as_deref()).await?;

    tracing::info!(learner_id = %learner.id, store = state.store.kind(), "registered learner");

    Ok(Json(LearnerRegisterResponse {
        learner_id: learner.id,
        token: learner.token,
    }))
}

/// GET /api/learner/status
pub async fn status(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
) -> Result<Json<LearnerStatusResponse>> {
    let learner = state
        .store
        .get_learner_by_token(&auth.token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Learner not found".to_string()))?;

    Ok(Json(LearnerStatusResponse {
        learner_id: learner.id,
        name: learner.name,
        last_seen_at: learner.last_seen_at,
    }))
}
