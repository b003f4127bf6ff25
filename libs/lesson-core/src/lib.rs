//! Core library of the Spanish tutor.
//!
//! Provides:
//! - Edit-distance similarity between short texts
//! - Grammar heuristics for Spanish written by Portuguese speakers
//! - Free-text answer evaluation (0-10 grade with feedback)
//! - The scripted conversation partner
//! - Multiple-choice grading, the grade book and backup documents

pub mod conversation;
pub mod error;
pub mod evaluator;
pub mod grading;
pub mod grammar;
pub mod progress;
pub mod rules;
pub mod similarity;
pub mod types;

pub use conversation::{
    classify, ChatReply, ConversationPartner, Intent, RngPicker, SequencePicker, TemplatePicker,
};
pub use error::{LessonError, Result};
pub use evaluator::{AnswerEvaluator, EvaluatorSettings};
pub use grading::{grade_choice, grade_question, ChoiceOutcome, QuestionGrade, QuestionResponse};
pub use grammar::{analyze, critique, Critique, GrammarAnalysis};
pub use progress::{
    needs_backup, parse_backup, parse_backup_value, BackupDocument, GradeBand, GradeBook,
    GradeRecord, GradeSummary, ImportedBackup, ProgressSnapshot,
};
pub use similarity::{levenshtein_distance, normalized_similarity};
pub use types::{EvaluationResult, FindingKind, GrammarFinding, LessonContext, Question};
