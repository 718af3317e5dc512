//! Error types for Quizling content and configuration.
//!
//! Content errors describe why a provider response could not become a
//! [`crate::Puzzle`]. The session controller never surfaces these details to
//! the player; they collapse into a single retry message and are logged.

use thiserror::Error;

use crate::GameMode;

/// Reasons a provider response is not a usable puzzle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// A required text field is empty or whitespace.
    #[error("{field} is empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Arithmetic questions carry exactly four options.
    #[error("expected 4 answer options, found {found}")]
    OptionCount {
        /// Number of options received.
        found: usize,
    },

    /// Two options carry the same text.
    #[error("duplicate answer option {option:?}")]
    DuplicateOption {
        /// The repeated option.
        option: String,
    },

    /// None of the options equals the correct answer.
    #[error("correct answer {answer:?} is not among the options")]
    MissingCorrectOption {
        /// The declared correct answer.
        answer: String,
    },

    /// A vocabulary puzzle without pairs.
    #[error("puzzle has no pairs")]
    NoPairs,

    /// Two pairs share a term.
    #[error("duplicate term {term:?}")]
    DuplicateTerm {
        /// The repeated term.
        term: String,
    },

    /// Two pairs share a match value.
    #[error("duplicate match {value:?}")]
    DuplicateMatch {
        /// The repeated match value.
        value: String,
    },

    /// Content for a different mode than requested.
    #[error("expected {expected} content, received {received}")]
    ModeMismatch {
        /// Mode of the request.
        expected: GameMode,
        /// Mode of the response.
        received: GameMode,
    },
}

/// Invalid [`crate::GameConfig`] values.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A game needs at least one level.
    #[error("max_level must be at least 1")]
    ZeroMaxLevel,

    /// A level needs at least one correct answer to complete.
    #[error("questions_to_level_up must be at least 1")]
    ZeroQuota,
}
