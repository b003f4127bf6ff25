//! Common test utilities for integration tests.
//!
//! `TestContext::new` runs the full router over the in-memory store, so most
//! tests need no external services. `TestContext::postgres` connects to the
//! database named by DATABASE_URL; tests using it are ignored by default.

pub mod fixtures;

use axum::http::StatusCode;
use axum::Router;
use axum_test::TestServer;
use uuid::Uuid;

use tutor_backend::config::Config;
use tutor_backend::db::Database;
use tutor_backend::services::Store;
use tutor_backend::{build_router, AppState};

/// Test context holding the application router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a context backed by the in-memory store.
    pub fn new() -> Self {
        Self::with_store(Store::memory())
    }

    /// Create a context backed by PostgreSQL.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or the connection fails.
    pub async fn postgres() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self::with_store(Store::Postgres(db))
    }

    fn with_store(store: Store) -> Self {
        let state = AppState::new(store, &Config::default());
        let app = build_router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Create a learner and return its ID and token.
    pub async fn create_test_learner(&self, name: Option<&str>) -> (Uuid, String) {
        let learner = self
            .state
            .store
            .create_learner(name)
            .await
            .expect("Failed to create test learner");
        (learner.id, learner.token)
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Record a grade through the API.
    pub async fn record_grade(
        server: &TestServer,
        token: &str,
        lesson: u32,
        label: &str,
        score: u8,
    ) -> serde_json::Value {
        let response = server
            .post("/api/grades")
            .add_header(
                axum::http::header::AUTHORIZATION,
                Self::auth_header_value(token),
            )
            .json(&fixtures::grade_request(lesson, label, score))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        response.json()
    }

    /// Remove a learner created against PostgreSQL. Grades cascade.
    pub async fn cleanup_learner(&self, learner_id: Uuid) {
        if let Store::Postgres(db) = self.state.store.as_ref() {
            let _ = sqlx::query("DELETE FROM learners WHERE id = $1")
                .bind(learner_id)
                .execute(db.pool())
                .await;
        }
    }
}
