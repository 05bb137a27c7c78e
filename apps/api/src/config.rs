use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only the Gemini API key is required; storage locations default to paths
/// under the working directory so a bare `cargo run` works.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub database_url: String,
    pub redis_url: String,
    pub ledger_path: String,
    pub upload_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            database_url: env_or("DATABASE_URL", "sqlite:resumes.db"),
            redis_url: env_or("REDIS_URL", "redis://127.0.0.1:6379"),
            ledger_path: env_or("LEDGER_PATH", "resumes.json"),
            upload_dir: env_or("UPLOAD_DIR", "uploads"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
