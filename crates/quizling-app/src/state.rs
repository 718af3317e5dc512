//! Observable session state types.
//!
//! This module defines [`SessionView`], an owned snapshot of everything the
//! presentation layer may read, and [`Interaction`], the interaction state
//! derived from it.
//!
//! These structures serve as the "View Model" for the application. They are
//! detached from the live [`crate::Session`], so renderers and invariant
//! checks can hold them across further events.

use std::collections::BTreeMap;

use quizling_core::{Feedback, GameMode, Puzzle};
use serde::Serialize;

/// Snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// Active mode. `None` before the first `initialize`.
    pub mode: Option<GameMode>,
    /// Current level, starting at 1.
    pub level: u32,
    /// Stars collected.
    pub score: u32,
    /// Correct completions in the current level.
    pub correct_in_level: u32,
    /// Puzzle being played. `None` while loading, after an error, or after
    /// the game ended.
    pub puzzle: Option<Puzzle>,
    /// A fetch is in flight.
    pub loading: bool,
    /// Player-facing error message.
    pub last_error: Option<String>,
    /// Pending feedback.
    pub feedback: Option<Feedback>,
    /// The level quota was reached; `proceed` advances.
    pub level_complete: bool,
    /// The final level was completed.
    pub game_over: bool,
    /// Vocabulary term awaiting a match.
    pub selected_term: Option<String>,
    /// Vocabulary pairs matched so far (term → match).
    pub matched_pairs: BTreeMap<String, String>,
    /// Interaction state derived from the fields above.
    pub interaction: Interaction,
}

/// What the player can currently do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Interaction {
    /// No session started yet.
    Idle,
    /// Waiting for content.
    Loading,
    /// Content could not be fetched; reselect a mode to retry.
    Unavailable,
    /// Playing an arithmetic question.
    Arithmetic(ArithmeticState),
    /// Playing a vocabulary puzzle.
    Vocabulary(VocabularyState),
    /// Game over acknowledged; back to mode selection.
    Finished,
}

/// Arithmetic interaction states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArithmeticState {
    /// Options are clickable.
    AwaitingAnswer,
    /// Feedback is waiting for `proceed`.
    FeedbackShown,
}

/// Vocabulary interaction states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VocabularyState {
    /// No term selected.
    NoSelection,
    /// A term awaits its match.
    TermSelected,
    /// A self-dismissing message is shown.
    TransientFeedback,
    /// The puzzle was completed; feedback waits for `proceed`.
    BlockingFeedback,
}
