//! Scoring and leveling rule shared by both puzzle kinds.
//!
//! The two interaction state machines differ only in how they detect that a
//! puzzle was solved. Once they do, [`Scoreboard::record_correct`] decides
//! the outcome.

use serde::Serialize;

use crate::GameConfig;

/// Stars awarded per solved puzzle.
pub const STARS_PER_PUZZLE: u32 = 10;

/// Outcome of a solved puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Award {
    /// Level continues.
    Correct,
    /// Quota reached; the next level is available.
    LevelUp {
        /// Level the player advances to on `proceed`.
        next_level: u32,
    },
    /// Quota reached on the last level.
    GameOver {
        /// Score including this award.
        final_score: u32,
    },
}

/// Level, score, and per-level progress of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    level: u32,
    score: u32,
    correct_in_level: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    /// Level 1, no stars.
    pub fn new() -> Self {
        Self { level: 1, score: 0, correct_in_level: 0 }
    }

    /// Credit a solved puzzle and report what it unlocked.
    pub fn record_correct(&mut self, config: &GameConfig) -> Award {
        self.score = self.score.saturating_add(STARS_PER_PUZZLE);
        self.correct_in_level = self.correct_in_level.saturating_add(1);

        if self.correct_in_level < config.questions_to_level_up {
            return Award::Correct;
        }

        let next_level = self.level.saturating_add(1);
        if next_level > config.max_level {
            Award::GameOver { final_score: self.score }
        } else {
            Award::LevelUp { next_level }
        }
    }

    /// Move to the next level, clearing per-level progress.
    pub fn advance_level(&mut self) {
        self.level = self.level.saturating_add(1);
        self.correct_in_level = 0;
    }

    /// Current level, starting at 1.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total stars.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Correct completions in the current level.
    pub fn correct_in_level(&self) -> u32 {
        self.correct_in_level
    }
}
