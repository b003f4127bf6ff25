pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Limits};
use crate::db::Database;
use crate::services::Store;
use lesson_core::{AnswerEvaluator, ConversationPartner};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub evaluator: Arc<AnswerEvaluator>,
    pub partner: Arc<ConversationPartner>,
    pub limits: Limits,
}

impl AppState {
    pub fn new(store: Store, config: &Config) -> Self {
        Self {
            store: Arc::new(store),
            evaluator: Arc::new(AnswerEvaluator::new(config.evaluator.clone())),
            partner: Arc::new(ConversationPartner::default()),
            limits: config.limits,
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(database_url).await?;

            tracing::info!("Running migrations...");
            db.run_migrations().await?;

            Store::Postgres(db)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, progress is kept in memory");
            Store::memory()
        }
    };

    let app = build_router(AppState::new(store, &config)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router. Progress routes require a learner token.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/learner/status", get(routes::learner::status))
        .route("/api/grades", post(routes::grades::record))
        .route(
            "/api/progress",
            get(routes::progress::get).delete(routes::progress::clear),
        )
        .route("/api/progress/lesson", put(routes::progress::set_lesson))
        .route("/api/progress/settings", put(routes::progress::set_settings))
        .route(
            "/api/backup",
            get(routes::backup::export).post(routes::backup::import),
        )
        .route("/api/backup/status", get(routes::backup::status))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/learner/register", post(routes::learner::register))
        .route("/api/evaluate", post(routes::evaluate::evaluate))
        .route("/api/choice", post(routes::evaluate::choice))
        .route("/api/question", post(routes::evaluate::question))
        .route("/api/chat", post(routes::chat::chat))
        .merge(protected_routes)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
