//! Heuristic grading of open-ended written answers.
//!
//! A grade starts from a neutral base, is lifted by how close the answer is
//! to any reference answer, then nudged by the grammar heuristics in
//! [`crate::grammar`].

use crate::grammar::{self, GrammarAnalysis};
use crate::similarity::normalized_similarity;
use crate::types::EvaluationResult;
use serde::{Deserialize, Serialize};

pub const EMPTY_ANSWER_FEEDBACK: &str = "Por favor, escribe una respuesta.";
pub const PERFECT_FEEDBACK: &str = "¡Perfecto! Tu respuesta es exactamente correcta.";
pub const NEAR_PERFECT_FEEDBACK: &str = "¡Muy bien! Tu respuesta está casi perfecta.";
pub const PARTIAL_FEEDBACK: &str = "Buen intento. Tu respuesta está en el camino correcto.";
pub const KEYWORD_FEEDBACK: &str = "Tu respuesta contiene algunas palabras correctas.";
pub const TOO_SHORT_FEEDBACK: &str = "Tu respuesta es muy corta. Intenta escribir más.";
pub const EXCELLENT_FEEDBACK: &str = "¡Excelente respuesta!";
pub const GOOD_FEEDBACK: &str = "Buena respuesta. Sigue practicando.";
pub const ACCEPTABLE_FEEDBACK: &str = "Respuesta aceptable, pero puedes mejorar.";
pub const NEEDS_PRACTICE_FEEDBACK: &str = "Necesitas practicar más. No te rindas.";

/// Tunable thresholds for [`AnswerEvaluator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorSettings {
    /// Score for a non-empty answer before any adjustment.
    pub base_score: f64,
    /// Similarity above which the answer is accepted with a 9.
    pub near_perfect_threshold: f64,
    /// Similarity above which the score becomes 7.
    pub partial_threshold: f64,
    /// Share of reference words that must appear in the answer.
    pub keyword_ratio: f64,
    /// Answers with fewer characters than this lose `short_answer_penalty`.
    pub min_answer_chars: usize,
    pub short_answer_penalty: f64,
    /// How many grammar findings are appended to the feedback.
    pub max_reported_findings: usize,
}

impl Default for EvaluatorSettings {
    fn default() -> Self {
        Self {
            base_score: 5.0,
            near_perfect_threshold: 0.8,
            partial_threshold: 0.6,
            keyword_ratio: 0.5,
            min_answer_chars: 5,
            short_answer_penalty: 2.0,
            max_reported_findings: 2,
        }
    }
}

/// Grades free-text answers against reference answers.
#[derive(Debug, Clone, Default)]
pub struct AnswerEvaluator {
    settings: EvaluatorSettings,
}

impl AnswerEvaluator {
    pub fn new(settings: EvaluatorSettings) -> Self {
        Self { settings }
    }

    /// Grade `answer` against `references`.
    ///
    /// References are tried in order. An exact or near-perfect match returns
    /// immediately. Weaker matches raise the score without ever lowering it,
    /// while the feedback keeps coming from the first reference that set it,
    /// except that a partial match always replaces the text.
    ///
    /// `context` is the question's optional context; it is accepted for
    /// callers that have one but does not affect the grade.
    pub fn evaluate<S: AsRef<str>>(
        &self,
        answer: &str,
        references: &[S],
        _context: &str,
    ) -> EvaluationResult {
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            return EvaluationResult {
                score: 0,
                feedback: EMPTY_ANSWER_FEEDBACK.to_string(),
                suggestion: None,
            };
        }

        let answer_lower = trimmed.to_lowercase();
        let mut score = self.settings.base_score;
        let mut feedback: Option<String> = None;
        let mut suggestion: Option<String> = None;

        for reference in references {
            let reference = reference.as_ref();
            let reference_lower = reference.trim().to_lowercase();

            if answer_lower == reference_lower {
                return EvaluationResult {
                    score: 10,
                    feedback: PERFECT_FEEDBACK.to_string(),
                    suggestion: None,
                };
            }

            let similarity = normalized_similarity(&answer_lower, &reference_lower);
            if similarity > self.settings.near_perfect_threshold {
                return EvaluationResult {
                    score: 9,
                    feedback: NEAR_PERFECT_FEEDBACK.to_string(),
                    suggestion: Some(reference.to_string()),
                };
            }

            if similarity > self.settings.partial_threshold {
                score = 7.0;
                feedback = Some(PARTIAL_FEEDBACK.to_string());
                suggestion = Some(reference.to_string());
            } else if self.has_keyword_overlap(&answer_lower, &reference_lower) {
                score = score.max(6.0);
                if feedback.is_none() {
                    feedback = Some(KEYWORD_FEEDBACK.to_string());
                    suggestion = Some(reference.to_string());
                }
            }
        }

        let GrammarAnalysis {
            bonus,
            penalty,
            findings,
            ..
        } = grammar::analyze(answer);
        score += bonus;
        score -= penalty;

        if answer.chars().count() < self.settings.min_answer_chars {
            score -= self.settings.short_answer_penalty;
            feedback.get_or_insert_with(|| TOO_SHORT_FEEDBACK.to_string());
        }

        if !findings.is_empty() {
            let reported = findings
                .iter()
                .take(self.settings.max_reported_findings)
                .map(|f| f.summary())
                .collect::<Vec<_>>()
                .join(". ");
            feedback = Some(match feedback {
                Some(existing) => format!("{existing} {reported}"),
                None => reported,
            });
        }

        let score = clamp_score(score);
        let feedback = feedback.unwrap_or_else(|| band_feedback(score).to_string());

        EvaluationResult {
            score,
            feedback,
            suggestion,
        }
    }

    /// Whether enough of the reference's words appear verbatim in the answer.
    fn has_keyword_overlap(&self, answer_lower: &str, reference_lower: &str) -> bool {
        let expected: Vec<&str> = reference_lower.split_whitespace().collect();
        if expected.is_empty() {
            return false;
        }

        let given: Vec<&str> = answer_lower.split_whitespace().collect();
        let matches = expected.iter().filter(|word| given.contains(word)).count();

        matches as f64 >= expected.len() as f64 * self.settings.keyword_ratio
    }
}

/// Round to the nearest integer and clamp into 0..=10.
fn clamp_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 10.0) as u8
}

/// Canned feedback for a final score, highest band first.
pub fn band_feedback(score: u8) -> &'static str {
    if score >= 8 {
        EXCELLENT_FEEDBACK
    } else if score >= 6 {
        GOOD_FEEDBACK
    } else if score >= 4 {
        ACCEPTABLE_FEEDBACK
    } else {
        NEEDS_PRACTICE_FEEDBACK
    }
}
