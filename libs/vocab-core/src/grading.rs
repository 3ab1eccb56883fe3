//! Answer normalization and grading.
//!
//! Free text is compared case- and whitespace-insensitively. Multiple-choice
//! options are compared exactly, since they are never typed by the user.
//!
//! Two empty strings grade as a match. A card with a blank reference value
//! would therefore accept a blank submission; the importer rejects such cards
//! but callers grading arbitrary strings should be aware of it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::{Answer, Question, QuestionShape};

/// Result of comparing a typed answer to the reference answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized reference answer (for display).
    pub correct_normalized: String,
}

/// Lower-case, trim and collapse runs of whitespace to a single space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compare a typed answer to the reference answer.
pub fn compare_free_text(typed: &str, correct: &str) -> MatchResult {
    let typed_normalized = normalize(typed);
    let correct_normalized = normalize(correct);

    MatchResult {
        is_correct: typed_normalized == correct_normalized,
        typed_normalized,
        correct_normalized,
    }
}

/// True iff both strings normalize to the same text.
pub fn grade_free_text(typed: &str, correct: &str) -> bool {
    compare_free_text(typed, correct).is_correct
}

/// True iff the typed text matches any of the accepted answers.
pub fn grade_free_text_any<S: AsRef<str>>(typed: &str, accepted: &[S]) -> bool {
    let typed = normalize(typed);
    accepted.iter().any(|a| normalize(a.as_ref()) == typed)
}

/// Exact comparison for a selected option.
pub fn grade_choice(selected: &str, correct: &str) -> bool {
    selected == correct
}

/// Set comparison for multi-select answers; order and duplicates are ignored.
pub fn grade_multi_choice<S: AsRef<str>, T: AsRef<str>>(selected: &[S], correct: &[T]) -> bool {
    let selected: HashSet<&str> = selected.iter().map(|s| s.as_ref()).collect();
    let correct: HashSet<&str> = correct.iter().map(|s| s.as_ref()).collect();
    selected == correct
}

/// Grade an answer using the grader appropriate for the question's shape.
///
/// A missing answer, or an answer of the wrong kind for the shape, is incorrect.
pub fn grade(question: &Question, answer: Option<&Answer>) -> bool {
    let Some(answer) = answer else {
        return false;
    };

    match (question.shape, answer) {
        (QuestionShape::Flashcard, Answer::Recall(remembered)) => *remembered,
        (QuestionShape::FreeText, Answer::Text(typed)) => {
            grade_free_text(typed, &question.correct_answer)
        }
        (QuestionShape::TermToDefinition | QuestionShape::DefinitionToTerm, Answer::Choice(selected)) => {
            grade_choice(selected, &question.correct_answer)
        }
        (QuestionShape::TermToDefinition | QuestionShape::DefinitionToTerm, Answer::Choices(selected)) => {
            grade_multi_choice(selected.as_slice(), &[question.correct_answer.as_str()])
        }
        _ => false,
    }
}
