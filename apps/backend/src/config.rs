//! Service configuration from environment variables.

use anyhow::Context;
use lesson_core::EvaluatorSettings;

/// Request size limits enforced before any grading happens.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_answer_chars: usize,
    pub max_references: usize,
    pub max_message_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_answer_chars: 5_000,
            max_references: 50,
            max_message_chars: 2_000,
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// PostgreSQL URL; progress is kept in memory when unset.
    pub database_url: Option<String>,
    pub evaluator: EvaluatorSettings,
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            evaluator: EvaluatorSettings::default(),
            limits: Limits::default(),
        }
    }
}

impl Config {
    /// Read configuration from the environment (and `.env` if present).
    ///
    /// Recognized variables:
    /// - HOST, PORT
    /// - DATABASE_URL
    /// - EVAL_NEAR_PERFECT_THRESHOLD, EVAL_PARTIAL_THRESHOLD
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, falling back to defaults for missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port:?}"))?;
        }
        config.database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        if let Some(value) = lookup("EVAL_NEAR_PERFECT_THRESHOLD") {
            config.evaluator.near_perfect_threshold = parse_ratio("EVAL_NEAR_PERFECT_THRESHOLD", &value)?;
        }
        if let Some(value) = lookup("EVAL_PARTIAL_THRESHOLD") {
            config.evaluator.partial_threshold = parse_ratio("EVAL_PARTIAL_THRESHOLD", &value)?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_ratio(key: &str, value: &str) -> anyhow::Result<f64> {
    let ratio: f64 = value
        .parse()
        .with_context(|| format!("{key} must be a number, got {value:?}"))?;
    anyhow::ensure!((0.0..=1.0).contains(&ratio), "{key} must be within 0..=1, got {ratio}");
    Ok(ratio)
}
