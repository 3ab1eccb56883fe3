//! Section import and export.
//!
//! # Format
//! ```json
//! [
//!   {
//!     "id": "8f6c…",
//!     "title": "Verbs",
//!     "description": "Motion verbs",
//!     "createdAt": "2024-03-01T09:00:00Z",
//!     "cards": [
//!       { "id": "1", "term": "run", "definition": "correr", "wordClass": "v" }
//!     ]
//!   }
//! ]
//! ```
//!
//! A single section object is accepted in place of the array. Only `title`
//! and `cards` are required; `word`/`meaning` are accepted as aliases for
//! `term`/`definition`, and IDs and timestamps may be numbers.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::{LibraryError, Result};
use crate::types::{Card, Section};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSection {
    #[serde(default)]
    id: Option<Value>,
    title: String,
    #[serde(default)]
    description: Option<String>,
    cards: Vec<RawCard>,
    #[serde(default)]
    created_at: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCard {
    #[serde(default)]
    id: Option<Value>,
    #[serde(alias = "word")]
    term: String,
    #[serde(alias = "meaning")]
    definition: String,
    #[serde(default)]
    word_class: Option<String>,
}

/// Parse exported JSON into sections.
///
/// The whole import is rejected if any element is not an object with a
/// string `title` and an array `cards`, or if any card is blank.
pub fn import_sections(json: &str) -> Result<Vec<Section>> {
    let value: Value = serde_json::from_str(json)?;

    let elements = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => return Err(LibraryError::NotASectionList),
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| parse_section(index, element))
        .collect()
}

/// Serialize sections to pretty JSON that [`import_sections`] accepts.
pub fn export_sections(sections: &[Section]) -> Result<String> {
    Ok(serde_json::to_string_pretty(sections)?)
}

/// Append imported sections, giving a new ID to any that collide with an existing one.
///
/// Returns the number of sections added.
pub fn merge_sections(existing: &mut Vec<Section>, imported: Vec<Section>) -> usize {
    let mut ids: HashSet<String> = existing.iter().map(|s| s.id.clone()).collect();
    let added = imported.len();

    for mut section in imported {
        if !ids.insert(section.id.clone()) {
            section.id = Uuid::new_v4().to_string();
            ids.insert(section.id.clone());
        }
        existing.push(section);
    }

    added
}

fn parse_section(index: usize, element: Value) -> Result<Section> {
    let invalid = |reason: &str| LibraryError::InvalidSection {
        index,
        reason: reason.to_string(),
    };

    let object = element.as_object().ok_or_else(|| invalid("not an object"))?;
    if !object.get("title").is_some_and(Value::is_string) {
        return Err(invalid("missing string field `title`"));
    }
    if !object.get("cards").is_some_and(Value::is_array) {
        return Err(invalid("missing array field `cards`"));
    }

    let raw: RawSection =
        serde_json::from_value(element).map_err(|e| invalid(&e.to_string()))?;

    let mut seen = HashSet::new();
    let mut cards = Vec::with_capacity(raw.cards.len());
    for (position, raw_card) in raw.cards.into_iter().enumerate() {
        let card = Card {
            id: raw_card.id.as_ref().and_then(id_string).unwrap_or_else(new_id),
            term: raw_card.term.trim().to_string(),
            definition: raw_card.definition.trim().to_string(),
            word_class: raw_card.word_class.filter(|w| !w.trim().is_empty()),
        };

        if !card.is_practicable() {
            return Err(LibraryError::IneligibleCard {
                section: raw.title,
                card: position + 1,
            });
        }
        if !seen.insert(card.id.clone()) {
            return Err(LibraryError::DuplicateCardId {
                section: raw.title,
                id: card.id,
            });
        }
        cards.push(card);
    }

    Ok(Section {
        id: raw.id.as_ref().and_then(id_string).unwrap_or_else(new_id),
        title: raw.title,
        description: raw.description.unwrap_or_default(),
        cards,
        created_at: raw
            .created_at
            .as_ref()
            .and_then(timestamp)
            .unwrap_or_else(Utc::now),
    })
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}
