//! Core types for the vocabulary drill engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::UnknownMode;

/// One vocabulary item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub term: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_class: Option<String>,
}

impl Card {
    /// Create a card with a freshly generated ID.
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            term: term.into(),
            definition: definition.into(),
            word_class: None,
        }
    }

    /// A card can be practised only when both sides have content.
    pub fn is_practicable(&self) -> bool {
        !self.term.trim().is_empty() && !self.definition.trim().is_empty()
    }
}

/// A named collection of cards. Owns its cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cards: Vec<Card>,
    pub created_at: DateTime<Utc>,
}

impl Section {
    /// Create an empty section with a fresh ID and the current timestamp.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            cards: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Cards eligible for practice, in display order.
    pub fn practice_cards(&self) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.is_practicable()).collect()
    }
}

/// Practice interaction styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
    Flashcard,
    Quiz,
    Response,
    Test,
}

impl PracticeMode {
    pub const ALL: [PracticeMode; 4] = [Self::Flashcard, Self::Quiz, Self::Response, Self::Test];

    /// Get the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flashcard => "flashcard",
            Self::Quiz => "quiz",
            Self::Response => "response",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PracticeMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flashcard" | "flashcards" => Ok(Self::Flashcard),
            "quiz" => Ok(Self::Quiz),
            "response" => Ok(Self::Response),
            "test" => Ok(Self::Test),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// How a question is posed and answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionShape {
    /// Term shown, user recalls the meaning and reports remembered/forgotten.
    Flashcard,
    /// Term shown, pick the meaning among four options.
    TermToDefinition,
    /// Meaning shown, pick the term among four options.
    DefinitionToTerm,
    /// Meaning shown, type the term.
    FreeText,
}

impl QuestionShape {
    pub fn is_multiple_choice(&self) -> bool {
        matches!(self, Self::TermToDefinition | Self::DefinitionToTerm)
    }
}

/// Session-scoped question identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A generated question. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub card: Card,
    pub shape: QuestionShape,
    /// Present only for multiple-choice shapes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
}

impl Question {
    /// Text shown to the user.
    pub fn prompt(&self) -> &str {
        match self.shape {
            QuestionShape::Flashcard | QuestionShape::TermToDefinition => &self.card.term,
            QuestionShape::DefinitionToTerm | QuestionShape::FreeText => &self.card.definition,
        }
    }
}

/// A submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// Typed free text.
    Text(String),
    /// One selected option.
    Choice(String),
    /// Several selected options.
    Choices(Vec<String>),
    /// Flashcard self-assessment: remembered or not.
    Recall(bool),
}
