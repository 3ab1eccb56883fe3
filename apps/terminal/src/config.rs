//! Runtime configuration.
//!
//! Values come from the command line, then the environment (a `.env` file
//! is loaded first), then defaults.

use std::path::PathBuf;

/// Environment variable naming the section database.
pub const DB_PATH_VAR: &str = "VOCAB_DB_PATH";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Resolve configuration from the process environment, preferring an
    /// explicit database path.
    pub fn resolve(db_path: Option<PathBuf>) -> Self {
        Self::resolve_with(db_path, |key| std::env::var(key).ok())
    }

    /// Resolve configuration with `lookup` standing in for the environment.
    pub fn resolve_with<F>(db_path: Option<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = db_path
            .or_else(|| lookup(DB_PATH_VAR).map(PathBuf::from))
            .unwrap_or_else(default_db_path);
        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            db_path,
            log_filter,
        }
    }
}

fn default_db_path() -> PathBuf {
    // Use the local data directory, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocab-drill")
        .join("sections.db")
}
