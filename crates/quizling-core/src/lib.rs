//! Quizling core
//!
//! Domain types and pure rules shared by every Quizling crate: game modes,
//! puzzle content and its validation, feedback messages, the scoring and
//! leveling rule, configuration, and the abstractions over time, randomness
//! and content sources.
//!
//! Nothing in this crate performs I/O. Content providers and the session
//! runtime live in `quizling-content` and `quizling-app`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod curriculum;
pub mod env;
pub mod error;
pub mod feedback;
pub mod mode;
pub mod provider;
pub mod puzzle;
pub mod scoring;

pub use config::GameConfig;
pub use curriculum::Theme;
pub use env::{EnvRng, Environment};
pub use error::{ConfigError, ContentError};
pub use feedback::{Feedback, FeedbackKind};
pub use mode::{GameMode, Operation};
pub use provider::ContentProvider;
pub use puzzle::{
    ArithmeticContent, ArithmeticQuestion, ContentRequest, ContentResponse, Puzzle, PuzzleId,
    VocabularyContent, VocabularyPuzzle, WordPair,
};
pub use scoring::{Award, STARS_PER_PUZZLE, Scoreboard};
