//! PostgreSQL database operations

use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use lesson_core::ImportedBackup;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Learner Repository ===

    /// Create a new learner with generated token
    pub async fn create_learner(&self, name: Option<&str>) -> Result<Learner> {
        let learner = sqlx::query_as::<_, Learner>(
            r#"
            INSERT INTO learners (id, token, name)
            VALUES ($1, $2, $3)
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(learner)
    }

    /// Get learner by token
    pub async fn get_learner_by_token(&self, token: &str) -> Result<Option<Learner>> {
        let learner = sqlx::query_as::<_, Learner>(
            r#"
            SELECT id, token, name, created_at, last_seen_at
            FROM learners
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(learner)
    }

    /// Update learner last_seen_at timestamp
    pub async fn update_last_seen(&self, learner_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE learners
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(learner_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Grade Repository ===

    /// Insert a grade, replacing any grade for the same lesson and label
    pub async fn upsert_grade(&self, learner_id: Uuid, grade: &GradeRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO grades (id, learner_id, lesson, label, score, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (learner_id, lesson, label)
            DO UPDATE SET score = EXCLUDED.score, recorded_at = EXCLUDED.recorded_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(learner_id)
        .bind(grade.lesson as i32)
        .bind(&grade.label)
        .bind(i16::from(grade.score))
        .bind(grade.recorded_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get all grades of a learner, oldest first
    pub async fn get_grades(&self, learner_id: Uuid) -> Result<Vec<DbGrade>> {
        let grades = sqlx::query_as::<_, DbGrade>(
            r#"
            SELECT id, learner_id, lesson, label, score, recorded_at
            FROM grades
            WHERE learner_id = $1
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(learner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(grades)
    }

    // === Progress Metadata ===

    /// Get current lesson, settings and backup marker
    pub async fn get_meta(&self, learner_id: Uuid) -> Result<DbLearnerMeta> {
        let meta = sqlx::query_as::<_, DbLearnerMeta>(
            r#"
            SELECT current_lesson, settings, last_backup_grade_count
            FROM learners
            WHERE id = $1
            "#,
        )
        .bind(learner_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Learner not found".to_string()))?;

        Ok(meta)
    }

    pub async fn set_current_lesson(&self, learner_id: Uuid, lesson: u32) -> Result<()> {
        sqlx::query("UPDATE learners SET current_lesson = $2 WHERE id = $1")
            .bind(learner_id)
            .bind(lesson as i32)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_settings(&self, learner_id: Uuid, settings: &Value) -> Result<()> {
        sqlx::query("UPDATE learners SET settings = $2 WHERE id = $1")
            .bind(learner_id)
            .bind(settings)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_last_backup_count(&self, learner_id: Uuid, count: usize) -> Result<()> {
        sqlx::query("UPDATE learners SET last_backup_grade_count = $2 WHERE id = $1")
            .bind(learner_id)
            .bind(count as i32)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete all grades and reset the lesson pointer. Settings are kept.
    pub async fn clear_progress(&self, learner_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM grades WHERE learner_id = $1")
            .bind(learner_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE learners
            SET current_lesson = 1, last_backup_grade_count = 0
            WHERE id = $1
            "#,
        )
        .bind(learner_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Replace a learner's progress with an imported backup
    pub async fn restore_backup(&self, learner_id: Uuid, backup: &ImportedBackup) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM grades WHERE learner_id = $1")
            .bind(learner_id)
            .execute(&mut *tx)
            .await?;

        for grade in &backup.progress.grades {
            sqlx::query(
                r#"
                INSERT INTO grades (id, learner_id, lesson, label, score, recorded_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (learner_id, lesson, label)
                DO UPDATE SET score = EXCLUDED.score, recorded_at = EXCLUDED.recorded_at
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(learner_id)
            .bind(grade.lesson as i32)
            .bind(&grade.label)
            .bind(i16::from(grade.score.min(10)))
            .bind(grade.recorded_at)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            UPDATE learners
            SET current_lesson = $2, settings = COALESCE($3, settings)
            WHERE id = $1
            "#,
        )
        .bind(learner_id)
        .bind(backup.progress.current_lesson as i32)
        .bind(backup.settings.as_ref())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
