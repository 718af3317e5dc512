//! Game rules configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, FeedbackKind};

/// Default number of levels in a session.
pub const DEFAULT_MAX_LEVEL: u32 = 3;

/// Default number of correct completions required to finish a level.
pub const DEFAULT_QUESTIONS_TO_LEVEL_UP: u32 = 3;

/// How long a "Good Match!" message stays before dismissing itself.
pub const GOOD_MATCH_DISMISS: Duration = Duration::from_millis(1500);

/// How long an "Oops!" message stays before dismissing itself.
pub const MISMATCH_DISMISS: Duration = Duration::from_millis(2000);

/// Rules for a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Highest playable level. Completing it ends the game.
    pub max_level: u32,
    /// Correct completions required within a level to advance.
    pub questions_to_level_up: u32,
    /// Auto-dismiss delay for a partial vocabulary match.
    pub good_match_dismiss: Duration,
    /// Auto-dismiss delay for a wrong vocabulary match.
    pub mismatch_dismiss: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            questions_to_level_up: DEFAULT_QUESTIONS_TO_LEVEL_UP,
            good_match_dismiss: GOOD_MATCH_DISMISS,
            mismatch_dismiss: MISMATCH_DISMISS,
        }
    }
}

impl GameConfig {
    /// Set the highest playable level.
    #[must_use]
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    /// Set the per-level quota of correct completions.
    #[must_use]
    pub fn with_questions_to_level_up(mut self, quota: u32) -> Self {
        self.questions_to_level_up = quota;
        self
    }

    /// Reject configurations no session could be played with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_level == 0 {
            return Err(ConfigError::ZeroMaxLevel);
        }
        if self.questions_to_level_up == 0 {
            return Err(ConfigError::ZeroQuota);
        }
        Ok(())
    }

    /// Auto-dismiss delay for a feedback kind. `None` for blocking feedback.
    pub fn dismiss_delay(&self, kind: FeedbackKind) -> Option<Duration> {
        match kind {
            FeedbackKind::GoodMatch => Some(self.good_match_dismiss),
            FeedbackKind::Mismatch => Some(self.mismatch_dismiss),
            FeedbackKind::Correct
            | FeedbackKind::LevelUp
            | FeedbackKind::GameOver
            | FeedbackKind::Incorrect => None,
        }
    }
}
