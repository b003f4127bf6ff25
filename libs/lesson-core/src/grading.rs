//! Multiple-choice grading.

use crate::error::{LessonError, Result};
use crate::evaluator::AnswerEvaluator;
use crate::types::{EvaluationResult, Question};
use serde::{Deserialize, Serialize};

/// Score for a correct multiple-choice answer; a wrong one scores 0.
pub const FULL_MARKS: u8 = 10;

/// Result of grading a multiple-choice answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOutcome {
    pub is_correct: bool,
    pub score: u8,
    /// Index of the right option, for highlighting.
    pub correct: usize,
}

/// Grade the option the learner selected.
pub fn grade_choice(selected: usize, correct: usize, option_count: usize) -> Result<ChoiceOutcome> {
    if option_count == 0 {
        return Err(LessonError::NoOptions);
    }
    for index in [selected, correct] {
        if index >= option_count {
            return Err(LessonError::OptionOutOfRange {
                index,
                option_count,
            });
        }
    }

    let is_correct = selected == correct;
    Ok(ChoiceOutcome {
        is_correct,
        score: if is_correct { FULL_MARKS } else { 0 },
        correct,
    })
}

/// What the learner submitted for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionResponse {
    /// Index of the chosen option.
    Selected(usize),
    /// Free-text answer.
    Answer(String),
}

/// Grade for one question, shaped by the question type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionGrade {
    Choice(ChoiceOutcome),
    FreeText(EvaluationResult),
}

impl QuestionGrade {
    pub fn score(&self) -> u8 {
        match self {
            Self::Choice(outcome) => outcome.score,
            Self::FreeText(result) => result.score,
        }
    }
}

/// Grade a response to a lesson question.
///
/// Multiple-choice questions take a selected index; free-text questions are
/// evaluated against their expected answers and context.
pub fn grade_question(
    question: &Question,
    response: &QuestionResponse,
    evaluator: &AnswerEvaluator,
) -> Result<QuestionGrade> {
    match (question, response) {
        (
            Question::MultipleChoice {
                options, correct, ..
            },
            QuestionResponse::Selected(selected),
        ) => Ok(QuestionGrade::Choice(grade_choice(
            *selected,
            *correct,
            options.len(),
        )?)),
        (
            Question::FreeText {
                expected, context, ..
            },
            QuestionResponse::Answer(answer),
        ) => Ok(QuestionGrade::FreeText(evaluator.evaluate(
            answer,
            expected,
            context.as_deref().unwrap_or_default(),
        ))),
        (Question::MultipleChoice { .. }, QuestionResponse::Answer(_)) => {
            Err(LessonError::ResponseMismatch {
                expected: "multiple choice",
                needs: "a selected option",
            })
        }
        (Question::FreeText { .. }, QuestionResponse::Selected(_)) => {
            Err(LessonError::ResponseMismatch {
                expected: "free text",
                needs: "a written answer",
            })
        }
    }
}
