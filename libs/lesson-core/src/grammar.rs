//! Rule-based grammar heuristics for Spanish written by Portuguese speakers.
//!
//! Everything here is substring or regex containment over the lowercased
//! text. There is no tokenizer, so a rule also fires inside longer words
//! ("sim" in "simple").

use crate::rules::{
    IdiomRule, InterferenceRule, PhraseRule, ACCENT_RULES, CHAT_COMMON_ERRORS,
    CHAT_INTERFERENCE_WORDS, COMMON_MISTAKES, IDIOM_RULES, INTERFERENCE_WORDS,
};
use crate::types::{FindingKind, GrammarFinding};
use once_cell::sync::Lazy;
use regex::Regex;

pub const BONUS_CAP: f64 = 2.0;
pub const PENALTY_CAP: f64 = 3.0;
pub const MISTAKE_PENALTY: f64 = 0.5;

const CHAT_START_SCORE: i32 = 10;
const CHAT_MISTAKE_PENALTY: i32 = 2;
const CHAT_INTERFERENCE_PENALTY: i32 = 3;
const CHAT_ACCENT_PENALTY: i32 = 1;
const CHAT_MAX_FINDINGS: usize = 3;

static IDIOM_PATTERNS: Lazy<Vec<(Regex, &'static IdiomRule)>> = Lazy::new(|| {
    IDIOM_RULES
        .iter()
        .map(|rule| {
            let re = Regex::new(rule.pattern).expect("idiom patterns are valid regexes");
            (re, rule)
        })
        .collect()
});

/// Result of the answer-evaluator analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrammarAnalysis {
    /// Idiomatic-form bonus, at most [`BONUS_CAP`].
    pub bonus: f64,
    /// Interference plus mistake penalty, at most [`PENALTY_CAP`].
    pub penalty: f64,
    pub findings: Vec<GrammarFinding>,
    /// Rules for correct phrases the text used.
    pub acknowledgments: Vec<&'static str>,
}

/// Score the Spanish quality of a free-text answer.
pub fn analyze(text: &str) -> GrammarAnalysis {
    let lower = text.to_lowercase();

    let bonus: f64 = IDIOM_PATTERNS
        .iter()
        .filter(|(re, _)| re.is_match(&lower))
        .map(|(_, rule)| rule.bonus)
        .sum();

    let mut penalty = 0.0;
    let mut findings = Vec::new();

    for word in scan_interference(&lower, INTERFERENCE_WORDS) {
        penalty += word.penalty;
        findings.push(interference_finding(word));
    }

    let (mistakes, acknowledgments) = scan_phrases(&lower, COMMON_MISTAKES);
    for rule in mistakes {
        penalty += MISTAKE_PENALTY;
        findings.push(phrase_finding(rule, FindingKind::CommonMistake));
    }

    GrammarAnalysis {
        bonus: bonus.min(BONUS_CAP),
        penalty: penalty.min(PENALTY_CAP),
        findings,
        acknowledgments,
    }
}

/// Result of critiquing a chat sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Critique {
    pub score: u8,
    /// At most three findings: mistakes, then Portuguese words, then accents.
    pub findings: Vec<GrammarFinding>,
    pub acknowledgments: Vec<&'static str>,
}

/// Critique a free-form sentence with the conversation tables.
///
/// Starts from a perfect 10 and subtracts per finding, unlike [`analyze`]
/// which adjusts around the evaluator's base score.
pub fn critique(text: &str) -> Critique {
    let lower = text.to_lowercase();
    let mut score = CHAT_START_SCORE;
    let mut findings = Vec::new();

    let (mistakes, acknowledgments) = scan_phrases(&lower, CHAT_COMMON_ERRORS);
    for rule in mistakes {
        score -= CHAT_MISTAKE_PENALTY;
        findings.push(phrase_finding(rule, FindingKind::CommonMistake));
    }

    for word in scan_interference(&lower, CHAT_INTERFERENCE_WORDS) {
        score -= CHAT_INTERFERENCE_PENALTY;
        findings.push(interference_finding(word));
    }

    for rule in ACCENT_RULES.iter().filter(|r| lower.contains(r.wrong)) {
        score -= CHAT_ACCENT_PENALTY;
        findings.push(phrase_finding(rule, FindingKind::Accent));
    }

    findings.truncate(CHAT_MAX_FINDINGS);

    Critique {
        score: score.clamp(0, 10) as u8,
        findings,
        acknowledgments,
    }
}

fn scan_interference<'a>(
    lower: &'a str,
    table: &'static [InterferenceRule],
) -> impl Iterator<Item = &'static InterferenceRule> + 'a {
    table
        .iter()
        .filter(move |w| w.penalty > 0.0 && lower.contains(w.native))
}

/// Split the phrase rules found in `lower` into real mistakes and acknowledgments.
fn scan_phrases(
    lower: &str,
    table: &'static [PhraseRule],
) -> (Vec<&'static PhraseRule>, Vec<&'static str>) {
    let mut mistakes = Vec::new();
    let mut acknowledgments = Vec::new();

    for rule in table.iter().filter(|r| lower.contains(r.wrong)) {
        if rule.is_acknowledgment() {
            acknowledgments.push(rule.rule);
        } else {
            mistakes.push(rule);
        }
    }

    (mistakes, acknowledgments)
}

fn interference_finding(word: &InterferenceRule) -> GrammarFinding {
    GrammarFinding {
        kind: FindingKind::Interference,
        found_text: word.native.to_string(),
        correct_text: word.target.to_string(),
        explanation: word.explanation(),
    }
}

fn phrase_finding(rule: &PhraseRule, kind: FindingKind) -> GrammarFinding {
    GrammarFinding {
        kind,
        found_text: rule.wrong.trim().to_string(),
        correct_text: rule.correct.trim().to_string(),
        explanation: rule.rule.to_string(),
    }
}
