//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from lesson-core
pub use lesson_core::{
    ChatReply, ChoiceOutcome, EvaluationResult, GradeBand, GradeRecord, GradeSummary,
    ProgressSnapshot, Question, QuestionGrade, QuestionResponse,
};

// === Database Entity Types ===

/// Registered learner
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Learner {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Per-learner progress metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbLearnerMeta {
    pub current_lesson: i32,
    pub settings: Option<Value>,
    pub last_backup_grade_count: i32,
}

impl Default for DbLearnerMeta {
    fn default() -> Self {
        Self {
            current_lesson: 1,
            settings: None,
            last_backup_grade_count: 0,
        }
    }
}

/// Grade stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbGrade {
    pub id: Uuid,
    pub learner_id: Uuid,
    pub lesson: i32,
    pub label: String,
    pub score: i16,
    pub recorded_at: DateTime<Utc>,
}

impl DbGrade {
    /// Convert to lesson-core GradeRecord
    pub fn to_record(&self) -> GradeRecord {
        GradeRecord::new(
            self.lesson.max(0) as u32,
            self.label.clone(),
            self.score.clamp(0, 10) as u8,
            self.recorded_at,
        )
    }
}

// === API Request/Response Types ===

/// POST /api/learner/register request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearnerRegisterRequest {
    pub name: Option<String>,
}

/// POST /api/learner/register response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerRegisterResponse {
    pub learner_id: Uuid,
    pub token: String,
}

/// GET /api/learner/status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerStatusResponse {
    pub learner_id: Uuid,
    pub name: Option<String>,
    pub last_seen_at: DateTime<Utc>,
}

/// POST /api/evaluate request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub answer: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub context: Option<String>,
}

/// POST /api/choice request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceRequest {
    pub selected: usize,
    pub correct: usize,
    pub option_count: usize,
}

/// POST /api/question request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub question: Question,
    pub response: QuestionResponse,
}

/// POST /api/chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Title of the lesson being studied, if any.
    #[serde(default)]
    pub lesson_title: Option<String>,
}

/// POST /api/grades request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordGradeRequest {
    pub lesson: u32,
    pub label: String,
    pub score: u8,
}

/// Grade with its display band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeView {
    #[serde(flatten)]
    pub grade: GradeRecord,
    pub band: GradeBand,
}

impl From<&GradeRecord> for GradeView {
    fn from(grade: &GradeRecord) -> Self {
        Self {
            grade: grade.clone(),
            band: grade.band(),
        }
    }
}

/// POST /api/grades response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordGradeResponse {
    pub grade: GradeView,
    pub should_backup: bool,
}

/// GET /api/progress response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub current_lesson: u32,
    pub summary: GradeSummary,
    /// Newest first
    pub recent: Vec<GradeView>,
}

/// PUT /api/progress/lesson request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetLessonRequest {
    pub lesson: u32,
}

/// GET /api/backup/status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupStatusResponse {
    pub should_backup: bool,
    pub grades_since_backup: usize,
}

/// POST /api/backup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    pub current_lesson: u32,
    pub imported_grades: usize,
}
