//! Section library commands.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use vocab_core::{library, Section};

use crate::db::SectionRepository;

/// Find a section by 1-based list position or by ID.
pub fn resolve_section<R: SectionRepository>(repo: &R, selector: &str) -> Result<Section> {
    let sections = repo.load_sections()?;

    if let Ok(position) = selector.parse::<usize>() {
        if let Some(section) = position.checked_sub(1).and_then(|i| sections.get(i)) {
            return Ok(section.clone());
        }
    }

    match sections.into_iter().find(|s| s.id == selector) {
        Some(section) => Ok(section),
        None => bail!("no section matches {selector:?}"),
    }
}

/// Print the library with card counts.
pub fn list_sections<R: SectionRepository, W: Write>(repo: &R, out: &mut W) -> Result<()> {
    let sections = repo.load_sections()?;
    if sections.is_empty() {
        writeln!(out, "No sections yet. Import one with `vocab-drill import <file>`.")?;
        return Ok(());
    }

    for (i, section) in sections.iter().enumerate() {
        let practicable = section.practice_cards().len();
        writeln!(
            out,
            "{:>3}. {} ({} cards, created {})",
            i + 1,
            section.title,
            practicable,
            section.created_at.format("%Y-%m-%d")
        )?;
        if !section.description.is_empty() {
            writeln!(out, "     {}", section.description)?;
        }
    }
    Ok(())
}

/// Import sections from an exported JSON file, appending them to the library.
pub fn import_library<R: SectionRepository, W: Write>(
    repo: &R,
    path: &Path,
    out: &mut W,
) -> Result<usize> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let imported = library::import_sections(&content)
        .with_context(|| format!("{} is not a valid section export", path.display()))?;

    let mut sections = repo.load_sections()?;
    let added = library::merge_sections(&mut sections, imported);
    repo.save_sections(&sections)?;

    tracing::info!(added, path = %path.display(), "imported sections");
    writeln!(out, "Imported {added} section(s).")?;
    Ok(added)
}

/// Write the whole library to a JSON file.
pub fn export_library<R: SectionRepository, W: Write>(
    repo: &R,
    path: &Path,
    out: &mut W,
) -> Result<usize> {
    let sections = repo.load_sections()?;
    let json = library::export_sections(&sections)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(count = sections.len(), path = %path.display(), "exported sections");
    writeln!(out, "Exported {} section(s) to {}.", sections.len(), path.display())?;
    Ok(sections.len())
}

/// Delete a section and its cards.
pub fn delete_section<R: SectionRepository, W: Write>(
    repo: &R,
    selector: &str,
    out: &mut W,
) -> Result<()> {
    let section = resolve_section(repo, selector)?;
    let removed = repo.delete_section(&section.id)?;
    writeln!(
        out,
        "Deleted {:?} ({} cards).",
        removed.title,
        removed.cards.len()
    )?;
    Ok(())
}

/// Move a section between 1-based list positions.
pub fn move_section<R: SectionRepository, W: Write>(
    repo: &R,
    from: usize,
    to: usize,
    out: &mut W,
) -> Result<()> {
    if from == 0 || to == 0 {
        bail!("positions start at 1");
    }
    repo.move_section(from - 1, to - 1)?;
    writeln!(out, "Moved section {from} to position {to}.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteRepository;
    use pretty_assertions::assert_eq;
    use vocab_core::Card;

    fn repo_with(titles: &[&str]) -> SqliteRepository {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let sections: Vec<Section> = titles
            .iter()
            .map(|t| {
                let mut s = Section::new(*t, "");
                s.cards.push(Card::new("run", "correr"));
                s
            })
            .collect();
        repo.save_sections(&sections).unwrap();
        repo
    }

    #[test]
    fn resolve_by_position_and_id() {
        let repo = repo_with(&["A", "B"]);
        assert_eq!(resolve_section(&repo, "2").unwrap().title, "B");

        let id = repo.load_sections().unwrap()[0].id.clone();
        assert_eq!(resolve_section(&repo, &id).unwrap().title, "A");

        assert!(resolve_section(&repo, "0").is_err());
        assert!(resolve_section(&repo, "3").is_err());
        assert!(resolve_section(&repo, "missing").is_err());
    }

    #[test]
    fn list_prints_numbered_titles() {
        let repo = repo_with(&["Verbs", "Nouns"]);
        let mut out = Vec::new();
        list_sections(&repo, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  1. Verbs (1 cards"));
        assert!(text.contains("  2. Nouns (1 cards"));
    }

    #[test]
    fn list_empty_library() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let mut out = Vec::new();
        list_sections(&repo, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("No sections yet"));
    }

    #[test]
    fn export_then_import_appends_copies() {
        let repo = repo_with(&["A"]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        let mut out = Vec::new();

        assert_eq!(export_library(&repo, &path, &mut out).unwrap(), 1);
        assert_eq!(import_library(&repo, &path, &mut out).unwrap(), 1);

        let sections = repo.load_sections().unwrap();
        assert_eq!(sections.len(), 2);
        assert_ne!(sections[0].id, sections[1].id);
        assert_eq!(sections[0].cards, sections[1].cards);
    }

    #[test]
    fn import_rejects_malformed_file() {
        let repo = repo_with(&[]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"[{"title": "x"}]"#).unwrap();

        let mut out = Vec::new();
        assert!(import_library(&repo, &path, &mut out).is_err());
        assert!(repo.load_sections().unwrap().is_empty());
    }

    #[test]
    fn delete_and_move_by_position() {
        let repo = repo_with(&["A", "B", "C"]);
        let mut out = Vec::new();

        move_section(&repo, 3, 1, &mut out).unwrap();
        delete_section(&repo, "2", &mut out).unwrap();

        let titles: Vec<String> = repo
            .load_sections()
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["C", "B"]);
        assert!(move_section(&repo, 0, 1, &mut out).is_err());
    }
}
