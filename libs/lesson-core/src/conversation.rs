//! Scripted conversation partner ("Sofía").
//!
//! Classifies chat input as a greeting, a question or a statement and
//! answers from fixed templates. Statements are critiqued with
//! [`grammar::critique`] and graded. Template choice is the only random
//! step and goes through [`TemplatePicker`].

use crate::grammar::{self, Critique};
use crate::types::{GrammarFinding, LessonContext};
use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Chooses which template of a pool to use.
pub trait TemplatePicker {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Picks uniformly with any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngPicker<R> {
    rng: R,
}

impl<R: Rng> RngPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngPicker<ThreadRng> {
    /// Picker backed by the thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> TemplatePicker for RngPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed sequence of picks, wrapping around. Used for deterministic replies.
#[derive(Debug, Clone, Default)]
pub struct SequencePicker {
    picks: Vec<usize>,
    cursor: usize,
}

impl SequencePicker {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, cursor: 0 }
    }
}

impl TemplatePicker for SequencePicker {
    fn pick(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        pick % len
    }
}

/// Spanish template with its Portuguese translation.
#[derive(Debug, Clone, Copy)]
struct Template {
    es: &'static str,
    pt: &'static str,
}

const GREETINGS: &[Template] = &[
    Template {
        es: "¡Hola! ¿Cómo estás hoy?",
        pt: "Olá! Como você está hoje?",
    },
    Template {
        es: "¡Bienvenido! ¿En qué puedo ayudarte?",
        pt: "Bem-vindo! Em que posso ajudar?",
    },
    Template {
        es: "¡Qué bueno verte! ¿Listo para practicar?",
        pt: "Que bom ver você! Pronto para praticar?",
    },
];

const ENCOURAGEMENTS: &[Template] = &[
    Template {
        es: "¡Muy bien! Sigue así.",
        pt: "Muito bem! Continue assim.",
    },
    Template {
        es: "¡Excelente trabajo!",
        pt: "Excelente trabalho!",
    },
    Template {
        es: "¡Perfecto! Estás mejorando mucho.",
        pt: "Perfeito! Você está melhorando muito.",
    },
    Template {
        es: "¡Genial! Tu español es cada vez mejor.",
        pt: "Genial! Seu espanhol está cada vez melhor.",
    },
];

const CORRECTIONS: &[Template] = &[
    Template {
        es: "Casi perfecto, pero hay un pequeño error.",
        pt: "Quase perfeito, mas há um pequeno erro.",
    },
    Template {
        es: "Buen intento. Vamos a corregir algo.",
        pt: "Boa tentativa. Vamos corrigir algo.",
    },
    Template {
        es: "Muy cerca. Déjame ayudarte.",
        pt: "Muito perto. Deixa eu te ajudar.",
    },
];

const FOLLOW_UPS: &[Template] = &[
    Template {
        es: "¿Puedes escribir otra frase?",
        pt: "Pode escrever outra frase?",
    },
    Template {
        es: "¿Qué más quieres practicar?",
        pt: "O que mais quer praticar?",
    },
    Template {
        es: "¿Tienes alguna duda sobre la gramática?",
        pt: "Tem alguma dúvida sobre a gramática?",
    },
    Template {
        es: "¡Sigue practicando! ¿Quieres intentar de nuevo?",
        pt: "Continue praticando! Quer tentar de novo?",
    },
];

const NAME_REPLY: Template = Template {
    es: "Me llamo Sofía. Soy tu profesora virtual de español. ¿Y tú, cómo te llamas?",
    pt: "Me chamo Sofía. Sou sua professora virtual de espanhol. E você, como se chama?",
};

const HELP_REPLY: Template = Template {
    es: "Puedo ayudarte a practicar español. Escríbeme frases y yo las corrijo. También podemos hablar sobre la lección actual.",
    pt: "Posso te ajudar a praticar espanhol. Me escreva frases e eu corrijo. Também podemos falar sobre a lição atual.",
};

const GENERIC_QUESTION_REPLY: Template = Template {
    es: "Buena pregunta. ¿Puedes darme más detalles para ayudarte mejor?",
    pt: "Boa pergunta. Pode me dar mais detalhes para te ajudar melhor?",
};

const GREETING_MARKERS: &[&str] = &[
    "hola",
    "buenos días",
    "buenas tardes",
    "buenas noches",
    "qué tal",
    "cómo estás",
    "hi",
    "hello",
    "oi",
    "olá",
];

const QUESTION_OPENERS: &[&str] = &["cómo", "qué", "cuál", "dónde", "por qué"];

/// What kind of chat message the learner sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Question,
    Statement,
}

/// Reply to one chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub intent: Intent,
    /// Reply in Spanish.
    pub text: String,
    /// Portuguese translation of `text`.
    pub translation: String,
    /// Grade for statements; greetings and questions are not graded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<GrammarFinding>,
}

impl ChatReply {
    fn ungraded(intent: Intent, template: Template) -> Self {
        Self {
            intent,
            text: template.es.to_string(),
            translation: template.pt.to_string(),
            score: None,
            findings: Vec::new(),
        }
    }
}

/// Classify a message. Greetings win over questions, questions over statements.
pub fn classify(message: &str) -> Intent {
    let message = message.trim().to_lowercase();

    if GREETING_MARKERS.iter().any(|g| message.contains(g)) {
        Intent::Greeting
    } else if message.contains('?') || QUESTION_OPENERS.iter().any(|q| message.starts_with(q)) {
        Intent::Question
    } else {
        Intent::Statement
    }
}

/// Scripted practice partner.
#[derive(Debug, Clone)]
pub struct ConversationPartner {
    /// Lowest statement score that earns an encouragement.
    pub praise_threshold: u8,
}

impl Default for ConversationPartner {
    fn default() -> Self {
        Self {
            praise_threshold: 8,
        }
    }
}

impl ConversationPartner {
    /// Reply to `message`, optionally aware of the lesson being studied.
    pub fn respond(
        &self,
        message: &str,
        lesson: Option<&LessonContext>,
        picker: &mut dyn TemplatePicker,
    ) -> ChatReply {
        match classify(message) {
            Intent::Greeting => ChatReply::ungraded(Intent::Greeting, choose(GREETINGS, picker)),
            Intent::Question => self.answer_question(&message.trim().to_lowercase(), lesson),
            Intent::Statement => self.critique_statement(message, picker),
        }
    }

    fn answer_question(&self, message: &str, lesson: Option<&LessonContext>) -> ChatReply {
        if message.contains("llamas") || message.contains("nombre") {
            return ChatReply::ungraded(Intent::Question, NAME_REPLY);
        }

        if message.contains("ayuda") || message.contains("ayudar") {
            return ChatReply::ungraded(Intent::Question, HELP_REPLY);
        }

        if let Some(lesson) = lesson {
            if ["lección", "aula", "tema"].iter().any(|k| message.contains(k)) {
                return ChatReply {
                    intent: Intent::Question,
                    text: format!(
                        "Estamos estudiando: \"{}\". ¿Quieres practicar el vocabulario o la gramática?",
                        lesson.title
                    ),
                    translation: format!(
                        "Estamos estudando: \"{}\". Quer praticar o vocabulário ou a gramática?",
                        lesson.title
                    ),
                    score: None,
                    findings: Vec::new(),
                };
            }
        }

        ChatReply::ungraded(Intent::Question, GENERIC_QUESTION_REPLY)
    }

    fn critique_statement(&self, message: &str, picker: &mut dyn TemplatePicker) -> ChatReply {
        let Critique {
            score,
            findings,
            acknowledgments,
        } = grammar::critique(message);

        let (text, translation) = match findings.first() {
            None if score >= self.praise_threshold => {
                let encouragement = choose(ENCOURAGEMENTS, picker);
                let mut text = format!("{} Tu frase está muy bien escrita.", encouragement.es);
                let mut translation =
                    format!("{} Sua frase está muito bem escrita.", encouragement.pt);
                // Rule notes are Spanish in both, like the correction notes.
                for acknowledgment in &acknowledgments {
                    for reply in [&mut text, &mut translation] {
                        reply.push(' ');
                        reply.push_str(acknowledgment);
                    }
                }
                (text, translation)
            }
            Some(finding) => {
                let correction = choose(CORRECTIONS, picker);
                (
                    format!(
                        "{}\n\nCorrección: \"{}\" → \"{}\"\n{}",
                        correction.es,
                        finding.found_text,
                        finding.correct_text,
                        finding.explanation
                    ),
                    format!(
                        "{}\n\nCorreção: \"{}\" → \"{}\"\n{}",
                        correction.pt,
                        finding.found_text,
                        finding.correct_text,
                        finding.explanation
                    ),
                )
            }
            None => {
                let follow_up = choose(FOLLOW_UPS, picker);
                (
                    format!("Entiendo. {}", follow_up.es),
                    format!("Entendo. {}", follow_up.pt),
                )
            }
        };

        ChatReply {
            intent: Intent::Statement,
            text,
            translation,
            score: Some(score),
            findings,
        }
    }
}

fn choose(pool: &'static [Template], picker: &mut dyn TemplatePicker) -> Template {
    pool[picker.pick(pool.len()).min(pool.len() - 1)]
}
