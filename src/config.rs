// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Number of questions returned by the random endpoint when `count` is omitted.
pub const DEFAULT_RANDOM_COUNT: i64 = 10;

/// Upper bound for the `count` query parameter of the random endpoint.
pub const MAX_RANDOM_COUNT: i64 = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub cors_allowed_origins: Vec<String>,
    pub rust_log: String,
    pub log_dir: String,
    pub seed_questions: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://quiz.db".to_string());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse().ok())
            .unwrap_or(5);

        let cors_allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".to_string()),
        );

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let seed_questions = env::var("SEED_QUESTIONS")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        Self {
            host,
            port,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            rust_log,
            log_dir,
            seed_questions,
        }
    }
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
