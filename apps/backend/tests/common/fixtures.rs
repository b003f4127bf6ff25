//! Request bodies and backup documents used across tests.

use serde_json::{json, Value};

pub fn register_request(name: Option<&str>) -> Value {
    json!({ "name": name })
}

pub fn evaluate_request(answer: &str, references: &[&str]) -> Value {
    json!({
        "answer": answer,
        "references": references,
    })
}

pub fn grade_request(lesson: u32, label: &str, score: u8) -> Value {
    json!({
        "lesson": lesson,
        "label": label,
        "score": score,
    })
}

pub fn chat_request(message: &str, lesson_title: Option<&str>) -> Value {
    json!({
        "message": message,
        "lesson_title": lesson_title,
    })
}

/// Backup in the current export format.
pub fn current_backup(current_lesson: u32, scores: &[u8]) -> Value {
    let grades: Vec<Value> = scores
        .iter()
        .enumerate()
        .map(|(i, score)| {
            json!({
                "lesson": 1,
                "label": format!("Questão {}", i + 1),
                "score": score,
                "recorded_at": "2024-03-01T12:00:00Z",
            })
        })
        .collect();

    json!({
        "progress": {
            "current_lesson": current_lesson,
            "grades": grades,
            "saved_at": "2024-03-01T12:00:00Z",
        },
        "settings": { "voice": "es-ES", "rate": 0.9 },
        "exported_at": "2024-03-01T12:00:00Z",
        "version": "2.0",
        "app": "Español Virtual",
    })
}

/// Backup written by the first version of the app, with Portuguese keys.
pub fn legacy_backup() -> Value {
    json!({
        "aulaNumero": 4,
        "grades": [
            { "aula": 2, "titulo": "Questão 1", "nota": 10, "data": "2023-11-02T09:30:00Z" },
            { "aula": 3, "titulo": "Questão 1", "nota": 6, "data": "2023-11-03T09:30:00Z" },
        ],
    })
}
