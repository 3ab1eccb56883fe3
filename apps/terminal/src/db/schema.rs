//! SQLite schema definitions.

/// Key under which the section list is stored.
pub const SECTIONS_KEY: &str = "sections";

/// Key-value table holding JSON documents.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
