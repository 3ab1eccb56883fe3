//! Error types for vocab-core.

use thiserror::Error;

use crate::types::QuestionId;

/// Result type alias using LibraryError.
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Result type alias for session transitions.
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Errors raised while importing or exporting sections.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a section object or an array of sections")]
    NotASectionList,

    #[error("invalid section at index {index}: {reason}")]
    InvalidSection { index: usize, reason: String },

    #[error("section {section:?}: card {card} has a blank term or definition")]
    IneligibleCard { section: String, card: usize },

    #[error("section {section:?}: duplicate card ID {id}")]
    DuplicateCardId { section: String, id: String },
}

/// Errors raised by session transitions called in the wrong state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("nothing to practice")]
    NothingToPractice,

    #[error("no missed questions to retry")]
    NothingMissed,

    #[error("session is already finished")]
    NotInProgress,

    #[error("session is still in progress")]
    NotDone,

    #[error("unknown question ID {0}")]
    UnknownQuestion(QuestionId),
}

/// A practice mode name that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown practice mode {0:?} (expected flashcard, quiz, response or test)")]
pub struct UnknownMode(pub String);
