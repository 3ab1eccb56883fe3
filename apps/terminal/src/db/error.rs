//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupt section data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("section not found: {0}")]
    SectionNotFound(String),

    #[error("position {position} out of range (have {len} sections)")]
    InvalidPosition { position: usize, len: usize },
}
