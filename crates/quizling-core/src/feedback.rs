//! Player-facing feedback messages.
//!
//! Feedback is either *blocking* (acknowledged only through `proceed`) or
//! *transient* (dismisses itself after a delay). The distinction is carried
//! by [`FeedbackKind`] so nothing downstream has to compare headline strings.

use serde::Serialize;

use crate::Award;

/// What a feedback message reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeedbackKind {
    /// Puzzle solved, level continues.
    Correct,
    /// Puzzle solved and the level quota reached.
    LevelUp,
    /// Puzzle solved and the final level completed.
    GameOver,
    /// Wrong arithmetic answer.
    Incorrect,
    /// One vocabulary pair matched, more remain.
    GoodMatch,
    /// Wrong vocabulary match.
    Mismatch,
}

impl FeedbackKind {
    /// Headline shown above the detail text.
    pub fn headline(self) -> &'static str {
        match self {
            Self::Correct => "Correct!",
            Self::LevelUp => "Level Up!",
            Self::GameOver => "Congratulations!",
            Self::Incorrect => "Not Quite!",
            Self::GoodMatch => "Good Match!",
            Self::Mismatch => "Oops!",
        }
    }

    /// Dismisses itself after a delay.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::GoodMatch | Self::Mismatch)
    }

    /// Must be acknowledged with `proceed`.
    pub fn is_blocking(self) -> bool {
        !self.is_transient()
    }

    /// Reports a scoring event.
    pub fn is_award(self) -> bool {
        matches!(self, Self::Correct | Self::LevelUp | Self::GameOver)
    }
}

/// A headline/detail pair describing the outcome of the last action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    kind: FeedbackKind,
    detail: String,
}

impl Feedback {
    /// Feedback for a scoring event.
    pub fn for_award(award: Award) -> Self {
        match award {
            Award::Correct => Self::new(FeedbackKind::Correct, "Great job! Keep going!"),
            Award::LevelUp { next_level } => Self::new(
                FeedbackKind::LevelUp,
                format!("Awesome! You've reached Level {next_level}!"),
            ),
            Award::GameOver { final_score } => Self::new(
                FeedbackKind::GameOver,
                format!("You've mastered all levels with {final_score} stars! Amazing job!"),
            ),
        }
    }

    /// Wrong arithmetic answer, revealing the right one.
    pub fn incorrect(correct_answer: &str) -> Self {
        Self::new(
            FeedbackKind::Incorrect,
            format!("Good try! The correct answer was {correct_answer}."),
        )
    }

    /// A vocabulary pair was matched.
    pub fn good_match() -> Self {
        Self::new(FeedbackKind::GoodMatch, "You found a pair!")
    }

    /// A vocabulary match was wrong.
    pub fn mismatch() -> Self {
        Self::new(FeedbackKind::Mismatch, "That's not the right match. Try again!")
    }

    fn new(kind: FeedbackKind, detail: impl Into<String>) -> Self {
        Self { kind, detail: detail.into() }
    }

    /// What this feedback reports.
    pub fn kind(&self) -> FeedbackKind {
        self.kind
    }

    /// Headline text.
    pub fn headline(&self) -> &'static str {
        self.kind.headline()
    }

    /// Detail text.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// See [`FeedbackKind::is_transient`].
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }

    /// See [`FeedbackKind::is_blocking`].
    pub fn is_blocking(&self) -> bool {
        self.kind.is_blocking()
    }
}
