//! Learner progress: the grade book and backup documents.
//!
//! Backup JSON written by older versions of the app uses Portuguese field
//! names (`aulaNumero`, `aula`, `titulo`, `nota`, `data`); they are accepted
//! as aliases on import.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LessonError, Result};

pub const BACKUP_VERSION: &str = "2.0";
pub const BACKUP_APP_NAME: &str = "Español Virtual";
/// Grades recorded since the last export before a backup is suggested.
pub const BACKUP_INTERVAL: usize = 10;
/// How many grades the progress view lists.
pub const RECENT_LIMIT: usize = 50;
/// Label under which conversation grades are recorded.
pub const CHAT_LABEL: &str = "Chat con Sofía";

/// One recorded grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRecord {
    #[serde(alias = "aula")]
    pub lesson: u32,
    #[serde(alias = "titulo")]
    pub label: String,
    #[serde(alias = "nota")]
    pub score: u8,
    #[serde(alias = "data")]
    pub recorded_at: DateTime<Utc>,
}

impl GradeRecord {
    pub fn new(lesson: u32, label: impl Into<String>, score: u8, recorded_at: DateTime<Utc>) -> Self {
        Self {
            lesson,
            label: label.into(),
            score: score.min(10),
            recorded_at,
        }
    }

    pub fn band(&self) -> GradeBand {
        GradeBand::of(self.score)
    }
}

/// Display class of a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeBand {
    High,
    Medium,
    Low,
}

impl GradeBand {
    pub fn of(score: u8) -> Self {
        if score >= 7 {
            Self::High
        } else if score >= 5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Aggregate numbers for the progress view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeSummary {
    /// Mean score rounded to one decimal, `None` before the first grade.
    pub average: Option<f64>,
    pub completed_lessons: usize,
    pub total_grades: usize,
}

/// All grades of a learner, at most one per `(lesson, label)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeBook {
    grades: Vec<GradeRecord>,
}

impl GradeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored grades, keeping the last entry for each `(lesson, label)`.
    pub fn from_grades(grades: impl IntoIterator<Item = GradeRecord>) -> Self {
        let mut book = Self::new();
        for grade in grades {
            book.record(grade);
        }
        book
    }

    /// Add a grade, replacing any earlier grade for the same lesson and label.
    pub fn record(&mut self, grade: GradeRecord) {
        self.grades
            .retain(|g| !(g.lesson == grade.lesson && g.label == grade.label));
        self.grades.push(grade);
    }

    pub fn grades(&self) -> &[GradeRecord] {
        &self.grades
    }

    pub fn into_grades(self) -> Vec<GradeRecord> {
        self.grades
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    pub fn clear(&mut self) {
        self.grades.clear();
    }

    pub fn average(&self) -> Option<f64> {
        if self.grades.is_empty() {
            return None;
        }
        let total: u32 = self.grades.iter().map(|g| u32::from(g.score)).sum();
        let mean = f64::from(total) / self.grades.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }

    /// Number of distinct lessons with at least one grade.
    pub fn completed_lessons(&self) -> usize {
        self.grades
            .iter()
            .map(|g| g.lesson)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Newest grades first; equal times keep the latest recorded first.
    pub fn recent(&self, limit: usize) -> Vec<&GradeRecord> {
        let mut sorted: Vec<&GradeRecord> = self.grades.iter().rev().collect();
        sorted.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        sorted.truncate(limit);
        sorted
    }

    pub fn summary(&self) -> GradeSummary {
        GradeSummary {
            average: self.average(),
            completed_lessons: self.completed_lessons(),
            total_grades: self.grades.len(),
        }
    }
}

fn first_lesson() -> u32 {
    1
}

/// Saved state of a learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    #[serde(alias = "aulaNumero", default = "first_lesson")]
    pub current_lesson: u32,
    #[serde(default)]
    pub grades: Vec<GradeRecord>,
    #[serde(alias = "savedAt", default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Exported backup file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub progress: ProgressSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(alias = "exportedAt")]
    pub exported_at: DateTime<Utc>,
    pub version: String,
    pub app: String,
}

impl BackupDocument {
    pub fn new(progress: ProgressSnapshot, settings: Option<Value>, exported_at: DateTime<Utc>) -> Self {
        Self {
            progress,
            settings,
            exported_at,
            version: BACKUP_VERSION.to_string(),
            app: BACKUP_APP_NAME.to_string(),
        }
    }

    /// File name offered for download, dated by export day.
    pub fn file_name(&self) -> String {
        format!(
            "espanol-virtual-backup-{}.json",
            self.exported_at.format("%Y-%m-%d")
        )
    }
}

/// Progress and settings recovered from a backup file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedBackup {
    pub progress: ProgressSnapshot,
    pub settings: Option<Value>,
}

#[derive(Deserialize)]
struct CurrentBackup {
    progress: ProgressSnapshot,
    #[serde(default)]
    settings: Option<Value>,
}

#[derive(Deserialize)]
struct LegacyBackup {
    #[serde(rename = "aulaNumero")]
    current_lesson: u32,
    #[serde(default)]
    grades: Vec<GradeRecord>,
}

/// Parse a backup in either the current or the legacy flat format.
///
/// Legacy files carry no save time; `now` is used instead.
pub fn parse_backup(json: &str, now: DateTime<Utc>) -> Result<ImportedBackup> {
    parse_backup_value(serde_json::from_str(json)?, now)
}

/// Same as [`parse_backup`] for an already decoded document.
pub fn parse_backup_value(value: Value, now: DateTime<Utc>) -> Result<ImportedBackup> {
    let Some(object) = value.as_object() else {
        return Err(LessonError::InvalidBackup("expected a JSON object".to_string()));
    };

    let has = |key: &str| object.get(key).is_some_and(|v| !v.is_null());

    if has("progress") {
        let mut backup: CurrentBackup = serde_json::from_value(value)?;
        backup.progress.current_lesson = backup.progress.current_lesson.max(1);
        return Ok(ImportedBackup {
            progress: backup.progress,
            settings: backup.settings,
        });
    }

    if has("aulaNumero") {
        let legacy: LegacyBackup = serde_json::from_value(value)?;
        return Ok(ImportedBackup {
            progress: ProgressSnapshot {
                current_lesson: legacy.current_lesson.max(1),
                grades: legacy.grades,
                saved_at: Some(now),
            },
            settings: None,
        });
    }

    Err(LessonError::InvalidBackup(
        "no progress found in backup".to_string(),
    ))
}

/// Whether enough grades were recorded since the last export to suggest a backup.
pub fn needs_backup(grade_count: usize, last_backup_count: usize) -> bool {
    grade_count.saturating_sub(last_backup_count) >= BACKUP_INTERVAL
}
