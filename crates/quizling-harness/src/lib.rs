//! Deterministic simulation harness for Quizling sessions.
//!
//! Simulated implementations of the Environment, ContentProvider and Driver
//! traits for deterministic, reproducible testing of the session controller
//! and its runtime.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the full set.
//!
//! # Components
//!
//! - [`SimEnv`]: tokio clock plus seeded RNG
//! - [`ScriptedProvider`]: canned replies with per-reply latency
//! - [`SimDriver`]: scripted intents and pauses, render capture
//! - [`fixtures`]: canned puzzle content

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod invariants;
pub mod sim_driver;
pub mod sim_env;
pub mod sim_provider;

pub use invariants::{
    FeedbackMatchesPuzzle, Invariant, InvariantKind, InvariantRegistry, InvariantResult,
    LevelWithinBounds, MatchesBelongToPuzzle, PuzzleAbsentWhileUnavailable, ScoreStepsWithAward,
    SessionSnapshot, TerminalFlagsExclusive, Violation,
};
pub use sim_driver::{SimDriver, SimDriverError, Step};
pub use sim_env::SimEnv;
pub use sim_provider::{Reply, ScriptedFailure, ScriptedProvider};
