use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::ranking::vector_space::VectorizerConfig;

/// Application configuration loaded from environment variables.
/// Every variable has a default, so startup only fails on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cv_folder: PathBuf,
    /// `None` disables the persisted ranking table.
    pub ranking_csv_path: Option<PathBuf>,
    pub vectorizer: VectorizerConfig,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = VectorizerConfig::default();

        Ok(Config {
            host: env_or("HOST", "127.0.0.1"),
            port: parse_env("PORT", 5000)?,
            cv_folder: PathBuf::from(env_or("CV_FOLDER", "hojas_de_vida")),
            ranking_csv_path: optional_path(&env_or("RANKING_CSV_PATH", "ranking_monitores.csv")),
            vectorizer: VectorizerConfig {
                max_features: parse_env("TFIDF_MAX_FEATURES", defaults.max_features)?,
                ngram_max: parse_env("TFIDF_NGRAM_MAX", defaults.ngram_max)?.max(1),
            },
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn optional_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}
