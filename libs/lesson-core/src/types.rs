//! Core types shared by the evaluator, the conversation partner and the backend.

use serde::{Deserialize, Serialize};

/// Outcome of grading one free-text answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Integer grade, always within 0..=10.
    pub score: u8,
    pub feedback: String,
    /// Reference answer worth showing the learner, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Category of a detected grammar issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Portuguese word used where Spanish differs.
    Interference,
    /// Known incorrect Spanish phrasing.
    CommonMistake,
    /// Missing written accent.
    Accent,
}

/// One detected grammar issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarFinding {
    pub kind: FindingKind,
    pub found_text: String,
    pub correct_text: String,
    pub explanation: String,
}

impl GrammarFinding {
    /// Short form appended to evaluator feedback.
    ///
    /// Interference findings read as a replacement (`"não" → "no"`), the rest
    /// as their explanation.
    pub fn summary(&self) -> String {
        match self.kind {
            FindingKind::Interference => {
                format!("\"{}\" → \"{}\"", self.found_text, self.correct_text)
            }
            FindingKind::CommonMistake | FindingKind::Accent => self.explanation.clone(),
        }
    }
}

/// A test question as supplied by the lesson content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    MultipleChoice {
        prompt: String,
        options: Vec<String>,
        correct: usize,
    },
    FreeText {
        prompt: String,
        #[serde(default)]
        expected: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<String>,
    },
}

impl Question {
    pub fn prompt(&self) -> &str {
        match self {
            Self::MultipleChoice { prompt, .. } | Self::FreeText { prompt, .. } => prompt,
        }
    }
}

/// What the conversation partner knows about the current lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonContext {
    pub title: String,
}
