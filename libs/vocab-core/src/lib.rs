//! Core vocabulary drill engine shared by the practice front ends.
//!
//! Provides:
//! - Answer normalization and grading
//! - Distractor sampling for multiple-choice questions
//! - Question set generation per practice mode
//! - Session progress tracking (in progress, done, retry missed)
//! - Section import/export
//!
//! Everything here is synchronous and free of I/O. Randomness comes from an
//! injected [`rand::Rng`], so tests can seed it.

pub mod distractors;
pub mod error;
pub mod grading;
pub mod library;
pub mod question;
pub mod session;
pub mod types;

pub use error::{LibraryError, Result, SessionError, SessionResult, UnknownMode};
pub use grading::{
    compare_free_text, grade, grade_choice, grade_free_text, grade_free_text_any,
    grade_multi_choice, normalize, MatchResult,
};
pub use library::{export_sections, import_sections, merge_sections};
pub use question::{test_length, QuestionSetBuilder, OPTION_COUNT};
pub use session::{Phase, Score, Session, SessionEvent, Tally};
pub use types::{Answer, Card, PracticeMode, Question, QuestionId, QuestionShape, Section};
