//! Conversation practice endpoint

use axum::{extract::State, Json};

use crate::error::{ApiError, Result};
use crate::models::{ChatReply, ChatRequest};
use crate::AppState;
use lesson_core::{LessonContext, RngPicker};

/// POST /api/chat
/// Replies as the practice partner; statements come back graded
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }
    if message.chars().count() > state.limits.max_message_chars {
        return Err(ApiError::BadRequest(format!(
            "message exceeds {} characters",
            state.limits.max_message_chars
        )));
    }

    let lesson = payload
        .lesson_title
        .filter(|title| !title.trim().is_empty())
        .map(|title| LessonContext { title });

    let reply = state
        .partner
        .respond(message, lesson.as_ref(), &mut RngPicker::thread());

    tracing::debug!(intent = ?reply.intent, score = ?reply.score, "chat reply");

    Ok(Json(reply))
}
