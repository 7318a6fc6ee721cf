//! Application configuration constants.
//!
//! Centralizes all configurable values so handlers and the advisor share one
//! set of knobs.

use serde::Deserialize;
use std::path::PathBuf;

// ==================== Configuration File ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
    generator: Option<GeneratorConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeneratorConfig {
    provider: Option<String>,
}

fn read_config() -> Option<AppConfig> {
    let contents = std::fs::read_to_string("config.toml").ok()?;
    toml::from_str::<AppConfig>(&contents).ok()
}

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Priority 1: config.toml
    if let Some(config) = read_config() {
        if let Some(path) = config.database.and_then(|db| db.path) {
            tracing::info!("Using database from config.toml: {}", path);
            return PathBuf::from(path);
        }
    }

    // Priority 2: .env DATABASE_PATH
    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    // Default
    let default = PathBuf::from("data/medprep.db");
    tracing::info!("Using default database path: {}", default.display());
    default
}

/// Card generator provider name from config.toml, defaulting to the
/// heuristic generator.
pub fn load_generator_provider() -> String {
    read_config()
        .and_then(|config| config.generator)
        .and_then(|g| g.provider)
        .unwrap_or_else(|| "heuristic".to_string())
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Get the full server bind address
pub fn server_bind_addr() -> String {
    format!("{}:{}", SERVER_ADDR, SERVER_PORT)
}

// ==================== Study Configuration ====================

/// XP awarded per correctly recalled flashcard
pub const XP_PER_CARD: u32 = 5;

/// XP awarded per correctly answered quiz question
pub const XP_PER_QUIZ_QUESTION: u32 = 10;

/// Maximum cards enumerated into a single study session
pub const SESSION_CARD_LIMIT: usize = 20;

/// Cap on the estimated minutes shown for a review recommendation
pub const REVIEW_MINUTES_CAP: u32 = 30;

// ==================== Advisor Configuration ====================

/// Streak-at-risk window, exclusive on both ends: the quick-session rule
/// fires only when the time since the last study activity is strictly
/// between these bounds.
pub const STREAK_RISK_MIN_HOURS: i64 = 20;
pub const STREAK_RISK_MAX_HOURS: i64 = 48;

// ==================== Content Generation ====================

/// Upper bound on cards produced from a single content source
pub const MAX_GENERATED_CARDS: usize = 10;
