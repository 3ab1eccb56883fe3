//! Repository pattern for the section library.
//!
//! Sections live as one JSON array under a single key, the same shape the
//! export format uses.

use crate::db::error::DbError;
use crate::db::schema::{SCHEMA, SECTIONS_KEY};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use vocab_core::Section;

type Result<T> = std::result::Result<T, DbError>;

/// Repository for the ordered section list.
pub trait SectionRepository {
    fn load_sections(&self) -> Result<Vec<Section>>;
    fn save_sections(&self, sections: &[Section]) -> Result<()>;
    fn get_section(&self, id: &str) -> Result<Option<Section>>;
    fn upsert_section(&self, section: &Section) -> Result<()>;
    fn delete_section(&self, id: &str) -> Result<Section>;
    fn move_section(&self, from: usize, to: usize) -> Result<()>;
}

/// SQLite-backed key-value store.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl SectionRepository for SqliteRepository {
    fn load_sections(&self) -> Result<Vec<Section>> {
        match self.get_value(SECTIONS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_sections(&self, sections: &[Section]) -> Result<()> {
        let json = serde_json::to_string(sections)?;
        self.set_value(SECTIONS_KEY, &json)?;
        tracing::debug!(count = sections.len(), "saved sections");
        Ok(())
    }

    fn get_section(&self, id: &str) -> Result<Option<Section>> {
        Ok(self.load_sections()?.into_iter().find(|s| s.id == id))
    }

    fn upsert_section(&self, section: &Section) -> Result<()> {
        let mut sections = self.load_sections()?;
        match sections.iter_mut().find(|s| s.id == section.id) {
            Some(existing) => *existing = section.clone(),
            None => sections.push(section.clone()),
        }
        self.save_sections(&sections)
    }

    fn delete_section(&self, id: &str) -> Result<Section> {
        let mut sections = self.load_sections()?;
        let position = sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| DbError::SectionNotFound(id.to_string()))?;
        let removed = sections.remove(position);
        self.save_sections(&sections)?;
        Ok(removed)
    }

    fn move_section(&self, from: usize, to: usize) -> Result<()> {
        let mut sections = self.load_sections()?;
        let len = sections.len();
        for position in [from, to] {
            if position >= len {
                return Err(DbError::InvalidPosition { position, len });
            }
        }

        let section = sections.remove(from);
        sections.insert(to, section);
        self.save_sections(&sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vocab_core::Card;

    fn section(title: &str) -> Section {
        let mut section = Section::new(title, "");
        section.cards.push(Card::new(format!("{title} term"), format!("{title} meaning")));
        section
    }

    fn titles(repo: &SqliteRepository) -> Vec<String> {
        repo.load_sections()
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect()
    }

    #[test]
    fn empty_store_has_no_sections() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        assert!(repo.load_sections().unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let sections = vec![section("A"), section("B")];
        repo.save_sections(&sections).unwrap();
        assert_eq!(repo.load_sections().unwrap(), sections);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let mut a = section("A");
        repo.upsert_section(&a).unwrap();
        repo.upsert_section(&section("B")).unwrap();

        a.title = "A2".to_string();
        repo.upsert_section(&a).unwrap();

        assert_eq!(titles(&repo), vec!["A2", "B"]);
        assert_eq!(repo.get_section(&a.id).unwrap().unwrap().title, "A2");
    }

    #[test]
    fn delete_removes_section_and_cards() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let a = section("A");
        repo.save_sections(&[a.clone(), section("B")]).unwrap();

        let removed = repo.delete_section(&a.id).unwrap();
        assert_eq!(removed.cards.len(), 1);
        assert_eq!(titles(&repo), vec!["B"]);
        assert!(repo.get_section(&a.id).unwrap().is_none());
    }

    #[test]
    fn delete_unknown_section_fails() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        assert!(matches!(
            repo.delete_section("nope"),
            Err(DbError::SectionNotFound(_))
        ));
    }

    #[test]
    fn move_reorders() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.save_sections(&[section("A"), section("B"), section("C")])
            .unwrap();

        repo.move_section(0, 2).unwrap();
        assert_eq!(titles(&repo), vec!["B", "C", "A"]);

        repo.move_section(2, 0).unwrap();
        assert_eq!(titles(&repo), vec!["A", "B", "C"]);
    }

    #[test]
    fn move_out_of_range_fails() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.save_sections(&[section("A")]).unwrap();
        assert!(matches!(
            repo.move_section(0, 1),
            Err(DbError::InvalidPosition { position: 1, len: 1 })
        ));
    }
}
