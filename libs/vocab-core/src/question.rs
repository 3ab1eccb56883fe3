//! Question set generation.
//!
//! A [`QuestionSetBuilder`] turns a section into the ordered question
//! sequence for one session. Every mode goes through the same builder; the
//! [`PracticeMode`] decides how many questions are drawn and in which shapes.
//!
//! # Modes
//! - `flashcard` / `response`: one question per card, no options.
//! - `quiz`: one term-to-meaning question per card, options drawn from the
//!   meanings of the other cards.
//! - `test`: `n + ceil(n / 4)` questions, each drawing a card with
//!   replacement and a shape uniformly from term-to-meaning, meaning-to-term
//!   and free text.

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::distractors::{self, DEFINITION_FALLBACK, TERM_FALLBACK};
use crate::types::{Card, PracticeMode, Question, QuestionId, QuestionShape, Section};

/// Number of options shown for a multiple-choice question.
pub const OPTION_COUNT: usize = 4;

const TEST_SHAPES: [QuestionShape; 3] = [
    QuestionShape::TermToDefinition,
    QuestionShape::DefinitionToTerm,
    QuestionShape::FreeText,
];

/// Number of questions a mixed test draws for `card_count` cards.
pub fn test_length(card_count: usize) -> usize {
    card_count + card_count.div_ceil(4)
}

/// A question before it has been given a position and ID.
struct Draft {
    card: Card,
    shape: QuestionShape,
    options: Option<Vec<String>>,
    correct_answer: String,
}

/// Builds question sequences from an injected random source.
pub struct QuestionSetBuilder<R: Rng> {
    rng: R,
}

impl Default for QuestionSetBuilder<ThreadRng> {
    fn default() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> QuestionSetBuilder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Build the shuffled question sequence for `section` in `mode`.
    ///
    /// Returns an empty sequence when the section has no practicable cards.
    pub fn build(&mut self, section: &Section, mode: PracticeMode) -> Vec<Question> {
        let cards = section.practice_cards();
        if cards.is_empty() {
            return Vec::new();
        }

        let terms: Vec<&str> = cards.iter().map(|c| c.term.as_str()).collect();
        let meanings: Vec<&str> = cards.iter().map(|c| c.definition.as_str()).collect();

        let mut drafts: Vec<Draft> = match mode {
            PracticeMode::Flashcard => cards
                .iter()
                .map(|c| Self::plain(c, QuestionShape::Flashcard))
                .collect(),
            PracticeMode::Response => cards
                .iter()
                .map(|c| Self::plain(c, QuestionShape::FreeText))
                .collect(),
            PracticeMode::Quiz => cards
                .iter()
                .map(|card| {
                    let others: Vec<&str> = cards
                        .iter()
                        .filter(|other| other.id != card.id)
                        .map(|other| other.definition.as_str())
                        .collect();
                    self.choice(card, QuestionShape::TermToDefinition, &others)
                })
                .collect(),
            PracticeMode::Test => (0..test_length(cards.len()))
                .map(|_| {
                    let card = cards[self.rng.random_range(0..cards.len())];
                    let shape = TEST_SHAPES[self.rng.random_range(0..TEST_SHAPES.len())];
                    match shape {
                        QuestionShape::TermToDefinition => self.choice(card, shape, &meanings),
                        QuestionShape::DefinitionToTerm => self.choice(card, shape, &terms),
                        _ => Self::plain(card, shape),
                    }
                })
                .collect(),
        };

        drafts.shuffle(&mut self.rng);
        let questions = self.identify(drafts);

        tracing::debug!(
            section = %section.id,
            mode = %mode,
            cards = cards.len(),
            questions = questions.len(),
            "built question set"
        );

        questions
    }

    /// Shuffle a copy of `questions` and give every question a fresh ID.
    ///
    /// Multiple-choice options are reshuffled as well. Used when a session
    /// restarts with its missed subset.
    pub fn reissue(&mut self, questions: &[Question]) -> Vec<Question> {
        let mut drafts: Vec<Draft> = questions
            .iter()
            .map(|q| {
                let options = q.options.clone().map(|mut options| {
                    options.shuffle(&mut self.rng);
                    options
                });
                Draft {
                    card: q.card.clone(),
                    shape: q.shape,
                    options,
                    correct_answer: q.correct_answer.clone(),
                }
            })
            .collect();

        drafts.shuffle(&mut self.rng);
        self.identify(drafts)
    }

    fn plain(card: &Card, shape: QuestionShape) -> Draft {
        let correct_answer = match shape {
            QuestionShape::FreeText | QuestionShape::DefinitionToTerm => card.term.clone(),
            QuestionShape::Flashcard | QuestionShape::TermToDefinition => card.definition.clone(),
        };
        Draft {
            card: card.clone(),
            shape,
            options: None,
            correct_answer,
        }
    }

    fn choice(&mut self, card: &Card, shape: QuestionShape, pool: &[&str]) -> Draft {
        let mut draft = Self::plain(card, shape);
        let prefix = match shape {
            QuestionShape::DefinitionToTerm => TERM_FALLBACK,
            _ => DEFINITION_FALLBACK,
        };

        let picked = distractors::sample(
            &mut self.rng,
            &draft.correct_answer,
            pool,
            OPTION_COUNT - 1,
            prefix,
        );
        draft.options = Some(distractors::with_correct(
            &mut self.rng,
            &draft.correct_answer,
            picked,
        ));
        draft
    }

    fn identify(&mut self, drafts: Vec<Draft>) -> Vec<Question> {
        drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| Question {
                id: QuestionId::new(format!("{index}-{:016x}", self.rng.random::<u64>())),
                card: draft.card,
                shape: draft.shape,
                options: draft.options,
                correct_answer: draft.correct_answer,
            })
            .collect()
    }
}
