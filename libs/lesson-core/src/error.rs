//! Error types for lesson-core.

use thiserror::Error;

/// Result type alias using LessonError.
pub type Result<T> = std::result::Result<T, LessonError>;

/// Errors raised by the fallible parts of the core (grading and backups).
///
/// Free-text evaluation never fails; it has no variant here.
#[derive(Debug, Error)]
pub enum LessonError {
    #[error("option {index} out of range for a question with {option_count} options")]
    OptionOutOfRange { index: usize, option_count: usize },

    #[error("question has no options")]
    NoOptions,

    #[error("a {expected} question needs {needs}")]
    ResponseMismatch {
        expected: &'static str,
        needs: &'static str,
    },

    #[error("invalid backup: {0}")]
    InvalidBackup(String),

    #[error("malformed backup JSON: {0}")]
    Json(#[from] serde_json::Error),
}
