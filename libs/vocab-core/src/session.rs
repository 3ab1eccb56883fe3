//! Session progress tracking.
//!
//! A [`Session`] is a value: every transition borrows the current state and
//! returns the next one, so a rejected transition leaves the caller's state
//! untouched.
//!
//! ```text
//! start ──► InProgress(i) ──advance (last)──► Done ──restart_with_missed──► InProgress(0)
//!              │  ▲                             ▲
//!              └──┘ advance / go_back           │
//!              └──────────── finish_early ──────┘
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{SessionError, SessionResult};
use crate::grading;
use crate::question::QuestionSetBuilder;
use crate::types::{Answer, Question, QuestionId};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    InProgress { current: usize },
    Done,
}

/// User actions that move a session forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Submit { question: QuestionId, answer: Answer },
    Advance,
    GoBack,
    FinishEarly,
}

/// Running counts over the answers given so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
}

/// Final result of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    /// Questions answered wrongly or left unanswered, in session order.
    pub missed: Vec<Question>,
}

impl Score {
    /// Percentage of correct answers, 0 for an empty score.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }
}

/// One run through a generated question sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    questions: Vec<Question>,
    answers: HashMap<QuestionId, Answer>,
    phase: Phase,
}

impl Session {
    /// Begin a session at the first question with no answers.
    pub fn start(questions: Vec<Question>) -> SessionResult<Self> {
        if questions.is_empty() {
            return Err(SessionError::NothingToPractice);
        }
        Ok(Self {
            questions,
            answers: HashMap::new(),
            phase: Phase::InProgress { current: 0 },
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<QuestionId, Answer> {
        &self.answers
    }

    pub fn answer(&self, id: &QuestionId) -> Option<&Answer> {
        self.answers.get(id)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Question at the cursor, if still in progress.
    pub fn current(&self) -> Option<&Question> {
        match self.phase {
            Phase::InProgress { current } => self.questions.get(current),
            Phase::Done => None,
        }
    }

    /// One-based position and total, for "k of n" displays.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.questions.len();
        match self.phase {
            Phase::InProgress { current } => (current + 1, total),
            Phase::Done => (total, total),
        }
    }

    /// Record (or overwrite) the answer for a question. The cursor does not move.
    pub fn submit_answer(&self, id: &QuestionId, answer: Answer) -> SessionResult<Self> {
        self.in_progress()?;
        if !self.questions.iter().any(|q| &q.id == id) {
            return Err(SessionError::UnknownQuestion(id.clone()));
        }

        let mut next = self.clone();
        next.answers.insert(id.clone(), answer);
        Ok(next)
    }

    /// Move to the next question, or finish after the last one.
    pub fn advance(&self) -> SessionResult<Self> {
        let current = self.in_progress()?;
        let phase = if current + 1 < self.questions.len() {
            Phase::InProgress { current: current + 1 }
        } else {
            Phase::Done
        };
        Ok(self.with_phase(phase))
    }

    /// Move to the previous question; stays put on the first one.
    pub fn go_back(&self) -> SessionResult<Self> {
        let current = self.in_progress()?;
        Ok(self.with_phase(Phase::InProgress {
            current: current.saturating_sub(1),
        }))
    }

    /// End the session now. Unanswered questions count as missed.
    pub fn finish_early(&self) -> SessionResult<Self> {
        self.in_progress()?;
        Ok(self.with_phase(Phase::Done))
    }

    /// Apply a user event.
    pub fn apply(&self, event: SessionEvent) -> SessionResult<Self> {
        match event {
            SessionEvent::Submit { question, answer } => self.submit_answer(&question, answer),
            SessionEvent::Advance => self.advance(),
            SessionEvent::GoBack => self.go_back(),
            SessionEvent::FinishEarly => self.finish_early(),
        }
    }

    /// Whether the stored answer for `question` is correct.
    pub fn is_correct(&self, question: &Question) -> bool {
        grading::grade(question, self.answers.get(&question.id))
    }

    /// Counts over the questions answered so far. Available in any phase.
    pub fn tally(&self) -> Tally {
        self.questions
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .fold(Tally::default(), |mut tally, q| {
                tally.answered += 1;
                if self.is_correct(q) {
                    tally.correct += 1;
                } else {
                    tally.incorrect += 1;
                }
                tally
            })
    }

    /// Grade every question. Only available once the session is done.
    pub fn score(&self) -> SessionResult<Score> {
        if !self.is_done() {
            return Err(SessionError::NotDone);
        }

        let (correct, missed): (Vec<&Question>, Vec<&Question>) =
            self.questions.iter().partition(|q| self.is_correct(q));

        Ok(Score {
            correct: correct.len(),
            total: self.questions.len(),
            missed: missed.into_iter().cloned().collect(),
        })
    }

    /// Start a new session over the missed questions, reshuffled and re-identified.
    pub fn restart_with_missed<R: Rng>(
        &self,
        builder: &mut QuestionSetBuilder<R>,
    ) -> SessionResult<Self> {
        let score = self.score()?;
        if score.missed.is_empty() {
            return Err(SessionError::NothingMissed);
        }

        tracing::debug!(missed = score.missed.len(), "restarting with missed questions");
        Self::start(builder.reissue(&score.missed))
    }

    fn in_progress(&self) -> SessionResult<usize> {
        match self.phase {
            Phase::InProgress { current } => Ok(current),
            Phase::Done => Err(SessionError::NotInProgress),
        }
    }

    fn with_phase(&self, phase: Phase) -> Self {
        Self {
            questions: self.questions.clone(),
            answers: self.answers.clone(),
            phase,
        }
    }
}
