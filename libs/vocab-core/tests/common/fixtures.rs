//! Test fixtures and factory functions for creating test data.

use vocab_core::{Answer, Card, Question, QuestionShape, Section};

/// Generate a section with `num_cards` distinct cards.
pub fn sample_section(num_cards: usize) -> Section {
    let mut section = Section::new("Sample", "generated");
    section.cards = (0..num_cards)
        .map(|i| Card::new(format!("term {}", i + 1), format!("meaning {}", i + 1)))
        .collect();
    section
}

/// Section where every card shares the same meaning.
pub fn synonym_section(num_cards: usize) -> Section {
    let mut section = Section::new("Synonyms", "");
    section.cards = (0..num_cards)
        .map(|i| Card::new(format!("term {}", i + 1), "same"))
        .collect();
    section
}

/// The answer a user who knows the card would give.
pub fn right_answer(question: &Question) -> Answer {
    match question.shape {
        QuestionShape::Flashcard => Answer::Recall(true),
        QuestionShape::FreeText => Answer::Text(format!("  {} ", question.correct_answer.to_uppercase())),
        _ => Answer::Choice(question.correct_answer.clone()),
    }
}

/// An answer that is wrong for any shape.
pub fn wrong_answer(question: &Question) -> Answer {
    match question.shape {
        QuestionShape::Flashcard => Answer::Recall(false),
        QuestionShape::FreeText => Answer::Text(format!("{}ing", question.correct_answer)),
        _ => {
            let options = question.options.as_ref().expect("multiple choice has options");
            let wrong = options
                .iter()
                .find(|o| **o != question.correct_answer)
                .expect("options hold distractors");
            Answer::Choice(wrong.clone())
        }
    }
}
