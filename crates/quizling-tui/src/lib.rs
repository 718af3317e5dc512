//! Terminal UI for Quizling
//!
//! A thin shell over [`quizling_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`quizling_app::Runtime`].
//!
//! This crate only handles line editing, command parsing and rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod input;
pub mod terminal;
pub mod ui;

pub use input::{InputState, KeyInput, KeyOutcome};
pub use quizling_app::{Driver, Runtime, Session, SessionEvent};
pub use terminal::{TerminalDriver, TerminalError};
