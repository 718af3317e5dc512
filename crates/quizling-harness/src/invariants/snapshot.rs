//! Observable state snapshots for invariant checking.
//!
//! A snapshot pairs the session view after a step with the view before it,
//! so transition properties (how the score may change) can be checked
//! alongside state properties.

use quizling_app::{Session, SessionView};
use quizling_core::GameConfig;

/// One observed step of a session.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// View before the step. `None` for the first observation.
    pub before: Option<SessionView>,
    /// View after the step.
    pub after: SessionView,
    /// Rules the session plays by.
    pub config: GameConfig,
}

impl SessionSnapshot {
    /// Observe `session` with no previous view.
    pub fn of(session: &Session) -> Self {
        Self { before: None, after: session.view(), config: *session.config() }
    }

    /// Observe `session` after a step that started from `before`.
    pub fn step(before: SessionView, session: &Session) -> Self {
        Self { before: Some(before), ..Self::of(session) }
    }
}
