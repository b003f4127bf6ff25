//! Progress store: PostgreSQL when configured, in memory otherwise.
//!
//! Handlers talk to [`Store`] only; each operation dispatches to the backend
//! chosen at startup.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::{DbLearnerMeta, GradeRecord, Learner};
use lesson_core::{GradeBook, ImportedBackup};

/// Learner progress persistence.
pub enum Store {
    Postgres(Database),
    Memory(MemoryStore),
}

impl Store {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::default())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    pub async fn create_learner(&self, name: Option<&str>) -> Result<Learner> {
        match self {
            Self::Postgres(db) => db.create_learner(name).await,
            Self::Memory(mem) => Ok(mem.create_learner(name).await),
        }
    }

    pub async fn get_learner_by_token(&self, token: &str) -> Result<Option<Learner>> {
        match self {
            Self::Postgres(db) => db.get_learner_by_token(token).await,
            Self::Memory(mem) => Ok(mem.get_learner_by_token(token).await),
        }
    }

    pub async fn update_last_seen(&self, learner_id: Uuid) -> Result<()> {
        match self {
            Self::Postgres(db) => db.update_last_seen(learner_id).await,
            Self::Memory(mem) => mem.with_learner(learner_id, |l| l.learner.last_seen_at = Utc::now()).await,
        }
    }

    pub async fn record_grade(&self, learner_id: Uuid, grade: GradeRecord) -> Result<()> {
        match self {
            Self::Postgres(db) => db.upsert_grade(learner_id, &grade).await,
            Self::Memory(mem) => mem.with_learner(learner_id, |l| l.book.record(grade)).await,
        }
    }

    pub async fn grade_book(&self, learner_id: Uuid) -> Result<GradeBook> {
        match self {
            Self::Postgres(db) => {
                let grades = db.get_grades(learner_id).await?;
                Ok(GradeBook::from_grades(grades.iter().map(|g| g.to_record())))
            }
            Self::Memory(mem) => mem.with_learner(learner_id, |l| l.book.clone()).await,
        }
    }

    pub async fn meta(&self, learner_id: Uuid) -> Result<DbLearnerMeta> {
        match self {
            Self::Postgres(db) => db.get_meta(learner_id).await,
            Self::Memory(mem) => mem.with_learner(learner_id, |l| l.meta.clone()).await,
        }
    }

    pub async fn set_current_lesson(&self, learner_id: Uuid, lesson: u32) -> Result<()> {
        match self {
            Self::Postgres(db) => db.set_current_lesson(learner_id, lesson).await,
            Self::Memory(mem) => {
                mem.with_learner(learner_id, |l| l.meta.current_lesson = lesson as i32)
                    .await
            }
        }
    }

    pub async fn set_settings(&self, learner_id: Uuid, settings: Value) -> Result<()> {
        match self {
            Self::Postgres(db) => db.set_settings(learner_id, &settings).await,
            Self::Memory(mem) => mem.with_learner(learner_id, |l| l.meta.settings = Some(settings)).await,
        }
    }

    pub async fn mark_backup(&self, learner_id: Uuid, grade_count: usize) -> Result<()> {
        match self {
            Self::Postgres(db) => db.set_last_backup_count(learner_id, grade_count).await,
            Self::Memory(mem) => {
                mem.with_learner(learner_id, |l| {
                    l.meta.last_backup_grade_count = grade_count as i32
                })
                .await
            }
        }
    }

    pub async fn clear_progress(&self, learner_id: Uuid) -> Result<()> {
        match self {
            Self::Postgres(db) => db.clear_progress(learner_id).await,
            Self::Memory(mem) => {
                mem.with_learner(learner_id, |l| {
                    l.book.clear();
                    l.meta.current_lesson = 1;
                    l.meta.last_backup_grade_count = 0;
                })
                .await
            }
        }
    }

    pub async fn restore_backup(&self, learner_id: Uuid, backup: ImportedBackup) -> Result<()> {
        match self {
            Self::Postgres(db) => db.restore_backup(learner_id, &backup).await,
            Self::Memory(mem) => {
                mem.with_learner(learner_id, |l| {
                    l.book = GradeBook::from_grades(backup.progress.grades);
                    l.meta.current_lesson = backup.progress.current_lesson as i32;
                    if let Some(settings) = backup.settings {
                        l.meta.settings = Some(settings);
                    }
                })
                .await
            }
        }
    }
}

/// Everything the in-memory store keeps for one learner.
#[derive(Debug, Clone)]
pub struct MemoryLearner {
    pub learner: Learner,
    pub book: GradeBook,
    pub meta: DbLearnerMeta,
}

/// Process-local store used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    learners: RwLock<HashMap<Uuid, MemoryLearner>>,
}

impl MemoryStore {
    async fn create_learner(&self, name: Option<&str>) -> Learner {
        let now = Utc::now();
        let learner = Learner {
            id: Uuid::new_v4(),
            token: Uuid::new_v4().to_string(),
            name: name.map(str::to_string),
            created_at: now,
            last_seen_at: now,
        };

        self.learners.write().await.insert(
            learner.id,
            MemoryLearner {
                learner: learner.clone(),
                book: GradeBook::new(),
                meta: DbLearnerMeta::default(),
            },
        );

        learner
    }

    async fn get_learner_by_token(&self, token: &str) -> Option<Learner> {
        self.learners
            .read()
            .await
            .values()
            .find(|l| l.learner.token == token)
            .map(|l| l.learner.clone())
    }

    async fn with_learner<T>(
        &self,
        learner_id: Uuid,
        f: impl FnOnce(&mut MemoryLearner) -> T,
    ) -> Result<T> {
        let mut learners = self.learners.write().await;
        let learner = learners
            .get_mut(&learner_id)
            .ok_or_else(|| ApiError::NotFound("Learner not found".to_string()))?;
        Ok(f(learner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::ProgressSnapshot;

    #[tokio::test]
    async fn test_memory_learner_lifecycle() {
        let store = Store::memory();
        let learner = store.create_learner(Some("Ana")).await.unwrap();

        let found = store.get_learner_by_token(&learner.token).await.unwrap();
        assert_eq!(found.map(|l| l.id), Some(learner.id));
        assert!(store.get_learner_by_token("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_grades_replace_by_label() {
        let store = Store::memory();
        let learner = store.create_learner(None).await.unwrap();

        store
            .record_grade(learner.id, GradeRecord::new(1, "Questão 1", 0, Utc::now()))
            .await
            .unwrap();
        store
            .record_grade(learner.id, GradeRecord::new(1, "Questão 1", 10, Utc::now()))
            .await
            .unwrap();

        let book = store.grade_book(learner.id).await.unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.average(), Some(10.0));
    }

    #[tokio::test]
    async fn test_memory_restore_and_clear() {
        let store = Store::memory();
        let learner = store.create_learner(None).await.unwrap();
        store
            .set_settings(learner.id, serde_json::json!({"voice": "es-MX"}))
            .await
            .unwrap();

        let backup = ImportedBackup {
            progress: ProgressSnapshot {
                current_lesson: 6,
                grades: vec![GradeRecord::new(5, "Questão 3", 8, Utc::now())],
                saved_at: None,
            },
            settings: None,
        };
        store.restore_backup(learner.id, backup).await.unwrap();

        let meta = store.meta(learner.id).await.unwrap();
        assert_eq!(meta.current_lesson, 6);
        assert!(meta.settings.is_some());
        assert_eq!(store.grade_book(learner.id).await.unwrap().len(), 1);

        store.clear_progress(learner.id).await.unwrap();
        let meta = store.meta(learner.id).await.unwrap();
        assert_eq!(meta.current_lesson, 1);
        assert!(store.grade_book(learner.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_learner_is_not_found() {
        let store = Store::memory();
        let result = store.meta(Uuid::new_v4()).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
