//! Static heuristic tables.
//!
//! Two overlapping families: the answer-evaluator tables and the
//! conversation-partner tables. Both are read-only for the life of the process.

/// Well-formed Spanish construction that earns a bonus when present.
#[derive(Debug, Clone, Copy)]
pub struct IdiomRule {
    /// Regex matched against the lowercased text.
    pub pattern: &'static str,
    pub bonus: f64,
}

/// Portuguese word that a Spanish learner from Brazil tends to carry over.
#[derive(Debug, Clone, Copy)]
pub struct InterferenceRule {
    pub native: &'static str,
    pub target: &'static str,
    /// Zero means the word is valid in both languages and is never flagged.
    pub penalty: f64,
}

impl InterferenceRule {
    pub fn explanation(&self) -> String {
        format!(
            "\"{}\" es portugués. En español decimos \"{}\"",
            self.native, self.target
        )
    }
}

/// Literal phrase with its correction.
///
/// When `wrong == correct` the phrase is already right and the entry only
/// exists to acknowledge it.
#[derive(Debug, Clone, Copy)]
pub struct PhraseRule {
    pub wrong: &'static str,
    pub correct: &'static str,
    pub rule: &'static str,
}

impl PhraseRule {
    pub fn is_acknowledgment(&self) -> bool {
        self.wrong == self.correct
    }
}

// === Answer evaluator ===

pub const IDIOM_RULES: &[IdiomRule] = &[
    // inverted question
    IdiomRule {
        pattern: r"¿.*\?",
        bonus: 0.5,
    },
    // inverted exclamation
    IdiomRule {
        pattern: r"¡.*!",
        bonus: 0.5,
    },
    // estar
    IdiomRule {
        pattern: r"está[ns]?|estoy|estamos",
        bonus: 0.3,
    },
    // tener
    IdiomRule {
        pattern: r"tengo|tienes|tiene|tenemos|tienen",
        bonus: 0.3,
    },
    // muy + adjective
    IdiomRule {
        pattern: r"muy\s+[0-9A-Za-z_]+",
        bonus: 0.3,
    },
    // gustar
    IdiomRule {
        pattern: r"me\s+gusta|te\s+gusta|le\s+gusta",
        bonus: 0.5,
    },
];

pub const INTERFERENCE_WORDS: &[InterferenceRule] = &[
    InterferenceRule { native: "você", target: "tú/usted", penalty: 1.0 },
    InterferenceRule { native: "não", target: "no", penalty: 1.0 },
    InterferenceRule { native: "sim", target: "sí", penalty: 0.5 },
    InterferenceRule { native: "bom", target: "bueno", penalty: 0.5 },
    InterferenceRule { native: "trabalho", target: "trabajo", penalty: 0.5 },
    InterferenceRule { native: "também", target: "también", penalty: 0.5 },
    InterferenceRule { native: "sempre", target: "siempre", penalty: 0.5 },
    InterferenceRule { native: "agora", target: "ahora", penalty: 0.5 },
    InterferenceRule { native: "então", target: "entonces", penalty: 0.5 },
    InterferenceRule { native: "porque", target: "porque/por qué", penalty: 0.0 },
];

pub const COMMON_MISTAKES: &[PhraseRule] = &[
    PhraseRule {
        wrong: "mui ",
        correct: "muy ",
        rule: "\"muy\" con Y",
    },
    PhraseRule {
        wrong: "mucho bueno",
        correct: "muy bueno",
        rule: "\"muy\" antes de adjetivos",
    },
    PhraseRule {
        wrong: "mucho malo",
        correct: "muy malo",
        rule: "\"muy\" antes de adjetivos",
    },
    PhraseRule {
        wrong: "soy de acuerdo",
        correct: "estoy de acuerdo",
        rule: "\"estar de acuerdo\"",
    },
    PhraseRule {
        wrong: "tener razón",
        correct: "tener razón",
        rule: "¡Correcto!",
    },
];

// === Conversation partner ===

pub const CHAT_COMMON_ERRORS: &[PhraseRule] = &[
    PhraseRule {
        wrong: "mui",
        correct: "muy",
        rule: "\"Muy\" se escribe con \"y\" al final",
    },
    PhraseRule {
        wrong: "mucho bueno",
        correct: "muy bueno",
        rule: "Antes de adjetivos usamos \"muy\", no \"mucho\"",
    },
    PhraseRule {
        wrong: "yo soy de acuerdo",
        correct: "estoy de acuerdo",
        rule: "Usamos \"estar de acuerdo\", no \"ser\"",
    },
    PhraseRule {
        wrong: "tener razón",
        correct: "tener razón",
        rule: "¡Correcto! Se dice \"tener razón\"",
    },
    PhraseRule {
        wrong: "hace calor",
        correct: "hace calor",
        rule: "¡Correcto! El clima usa \"hacer\"",
    },
    PhraseRule {
        wrong: "estoy con hambre",
        correct: "tengo hambre",
        rule: "En español decimos \"tener hambre\", no \"estar con hambre\"",
    },
    PhraseRule {
        wrong: "estoy con sed",
        correct: "tengo sed",
        rule: "En español decimos \"tener sed\"",
    },
    PhraseRule {
        wrong: "no me gusta nada",
        correct: "no me gusta nada",
        rule: "¡Correcto! La doble negación es normal en español",
    },
];

pub const CHAT_INTERFERENCE_WORDS: &[InterferenceRule] = &[
    InterferenceRule { native: "você", target: "tú/usted", penalty: 3.0 },
    InterferenceRule { native: "não", target: "no", penalty: 3.0 },
    InterferenceRule { native: "sim", target: "sí", penalty: 3.0 },
    InterferenceRule { native: "obrigado", target: "gracias", penalty: 3.0 },
    InterferenceRule { native: "tchau", target: "adiós/chao", penalty: 3.0 },
    InterferenceRule { native: "bom", target: "bueno", penalty: 3.0 },
    InterferenceRule { native: "ruim", target: "malo", penalty: 3.0 },
    InterferenceRule { native: "trabalho", target: "trabajo", penalty: 3.0 },
    InterferenceRule { native: "também", target: "también", penalty: 3.0 },
    InterferenceRule { native: "sempre", target: "siempre", penalty: 3.0 },
];

pub const ACCENT_RULES: &[PhraseRule] = &[
    PhraseRule {
        wrong: "esta bien",
        correct: "está bien",
        rule: "El verbo \"estar\" lleva acento: está",
    },
    PhraseRule {
        wrong: "el esta",
        correct: "él está",
        rule: "El pronombre \"él\" y el verbo \"está\" llevan acento",
    },
    PhraseRule {
        wrong: "como estas",
        correct: "cómo estás",
        rule: "\"Cómo\" y \"estás\" llevan acento en preguntas",
    },
    PhraseRule {
        wrong: "que hora",
        correct: "qué hora",
        rule: "\"Qué\" lleva acento en preguntas",
    },
];
