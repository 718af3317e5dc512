//! Session input events.
//!
//! This module defines [`SessionEvent`], the complete set of inputs that
//! drive the [`crate::Session`] state machine.
//!
//! Events originate from two distinct sources:
//! - Player intents forwarded by the presentation layer.
//! - Completions produced by the runtime (fetched content, elapsed timers).

use quizling_core::{GameMode, Puzzle};

use crate::TimerId;

/// Events processed by the Session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Start a new session in `mode`.
    Initialize {
        /// Mode to play.
        mode: GameMode,
    },

    /// Answer the current arithmetic question.
    SubmitAnswer {
        /// Option text chosen by the player.
        choice: String,
    },

    /// Select a vocabulary term.
    SelectTerm {
        /// Term text.
        term: String,
    },

    /// Pair the selected term with a match value.
    SelectMatch {
        /// Match text.
        value: String,
    },

    /// Acknowledge blocking feedback and move on.
    Proceed,

    /// Dismiss transient feedback early.
    ResetFeedback,

    /// Content arrived for a fetch.
    ContentLoaded {
        /// Generation of the fetch that produced it.
        generation: u64,
        /// Validated puzzle.
        puzzle: Puzzle,
    },

    /// A fetch produced nothing usable.
    ContentFailed {
        /// Generation of the failed fetch.
        generation: u64,
        /// Diagnostic description; logged, never shown to the player.
        reason: String,
    },

    /// A scheduled dismissal delay elapsed.
    DismissElapsed {
        /// Timer that fired.
        timer: TimerId,
    },

    /// Leave the application.
    Quit,
}
