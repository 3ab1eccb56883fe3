//! Local SQLite storage for the section library.

pub mod error;
pub mod repository;
pub mod schema;

pub use error::DbError;
pub use repository::{SectionRepository, SqliteRepository};
