//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use quizling_core::{FeedbackKind, Puzzle, STARS_PER_PUZZLE};

use super::{Invariant, InvariantKind, InvariantResult, SessionSnapshot, Violation};

/// No puzzle is shown while loading or after a failed fetch.
///
/// Loading and error are also mutually exclusive: a fetch in flight has not
/// failed yet.
pub struct PuzzleAbsentWhileUnavailable;

impl Invariant for PuzzleAbsentWhileUnavailable {
    fn kind(&self) -> InvariantKind {
        InvariantKind::PuzzleAbsentWhileUnavailable
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let view = &state.after;
        if (view.loading || view.last_error.is_some()) && view.puzzle.is_some() {
            return Err(Violation::new(
                self.kind(),
                format!(
                    "puzzle {:?} shown while loading={} error={:?}",
                    view.puzzle.as_ref().map(Puzzle::id),
                    view.loading,
                    view.last_error
                ),
            ));
        }
        if view.loading && view.last_error.is_some() {
            return Err(Violation::new(self.kind(), "loading with an error set"));
        }
        Ok(())
    }
}

/// Matched pairs and the selected term belong to the vocabulary puzzle.
///
/// Every matched pair is a correct pair, and the selected term is an
/// unmatched term of the puzzle.
pub struct MatchesBelongToPuzzle;

impl Invariant for MatchesBelongToPuzzle {
    fn kind(&self) -> InvariantKind {
        InvariantKind::MatchesBelongToPuzzle
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let view = &state.after;
        let Some(Puzzle::Vocabulary(puzzle)) = &view.puzzle else {
            if !view.matched_pairs.is_empty() || view.selected_term.is_some() {
                return Err(Violation::new(
                    self.kind(),
                    format!(
                        "matches {:?} / selection {:?} without a vocabulary puzzle",
                        view.matched_pairs, view.selected_term
                    ),
                ));
            }
            return Ok(());
        };

        for (term, value) in &view.matched_pairs {
            if puzzle.match_for(term) != Some(value.as_str()) {
                return Err(Violation::new(self.kind(), format!("{term} matched to wrong value {value}")));
            }
        }
        if let Some(term) = &view.selected_term {
            if !puzzle.has_term(term) || view.matched_pairs.contains_key(term) {
                return Err(Violation::new(self.kind(), format!("selected term {term} is not selectable")));
            }
        }
        Ok(())
    }
}

/// Feedback refers to the puzzle on screen.
///
/// Feedback needs a puzzle. A wrong-answer message needs an arithmetic
/// puzzle, and match messages need a vocabulary puzzle.
pub struct FeedbackMatchesPuzzle;

impl Invariant for FeedbackMatchesPuzzle {
    fn kind(&self) -> InvariantKind {
        InvariantKind::FeedbackMatchesPuzzle
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let view = &state.after;
        let Some(feedback) = &view.feedback else {
            return Ok(());
        };

        let consistent = match (feedback.kind(), &view.puzzle) {
            (_, None) => false,
            (FeedbackKind::Incorrect, Some(puzzle)) => matches!(puzzle, Puzzle::Arithmetic(_)),
            (FeedbackKind::GoodMatch | FeedbackKind::Mismatch, Some(puzzle)) => {
                matches!(puzzle, Puzzle::Vocabulary(_))
            },
            (FeedbackKind::Correct | FeedbackKind::LevelUp | FeedbackKind::GameOver, Some(_)) => true,
        };
        if consistent {
            Ok(())
        } else {
            Err(Violation::new(
                self.kind(),
                format!("{:?} feedback with puzzle {:?}", feedback.kind(), view.puzzle.as_ref().map(Puzzle::mode)),
            ))
        }
    }
}

/// Level-complete and game-over are exclusive and carry their feedback.
///
/// `level_complete` holds exactly while "Level Up!" waits for `proceed`.
/// `game_over` shows "Congratulations!" until acknowledged, then nothing.
pub struct TerminalFlagsExclusive;

impl Invariant for TerminalFlagsExclusive {
    fn kind(&self) -> InvariantKind {
        InvariantKind::TerminalFlagsExclusive
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let view = &state.after;
        let kind = view.feedback.as_ref().map(|feedback| feedback.kind());

        if view.level_complete && view.game_over {
            return Err(Violation::new(self.kind(), "level complete and game over at once"));
        }
        if view.level_complete != (kind == Some(FeedbackKind::LevelUp)) {
            return Err(Violation::new(
                self.kind(),
                format!("level_complete={} with feedback {kind:?}", view.level_complete),
            ));
        }
        if kind == Some(FeedbackKind::GameOver) && !view.game_over {
            return Err(Violation::new(self.kind(), "game over feedback without game over"));
        }
        if view.game_over && kind.is_some_and(|kind| kind != FeedbackKind::GameOver) {
            return Err(Violation::new(self.kind(), format!("game over with feedback {kind:?}")));
        }
        Ok(())
    }
}

/// Level and per-level progress stay within the configured bounds.
///
/// The quota count is reached exactly when a level or the game is complete.
pub struct LevelWithinBounds;

impl Invariant for LevelWithinBounds {
    fn kind(&self) -> InvariantKind {
        InvariantKind::LevelWithinBounds
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let view = &state.after;
        let config = &state.config;

        if view.level == 0 || view.level > config.max_level {
            return Err(Violation::new(
                self.kind(),
                format!("level {} outside 1..={}", view.level, config.max_level),
            ));
        }
        if view.correct_in_level > config.questions_to_level_up {
            return Err(Violation::new(
                self.kind(),
                format!("{} correct exceeds quota {}", view.correct_in_level, config.questions_to_level_up),
            ));
        }
        let quota_reached = view.correct_in_level == config.questions_to_level_up;
        if quota_reached != (view.level_complete || view.game_over) {
            return Err(Violation::new(
                self.kind(),
                format!(
                    "{} correct with level_complete={} game_over={}",
                    view.correct_in_level, view.level_complete, view.game_over
                ),
            ));
        }
        Ok(())
    }
}

/// Score only grows in steps of ten, each with scoring feedback.
///
/// The only other change allowed is a reset to zero when a new session
/// starts at level 1.
pub struct ScoreStepsWithAward;

impl Invariant for ScoreStepsWithAward {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ScoreStepsWithAward
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let after = &state.after;
        if after.score % STARS_PER_PUZZLE != 0 {
            return Err(Violation::new(self.kind(), format!("score {} not a multiple of 10", after.score)));
        }

        let Some(before) = &state.before else {
            return Ok(());
        };
        let awarded = after.feedback.as_ref().is_some_and(|feedback| feedback.kind().is_award());
        let allowed = after.score == before.score
            || (after.score == before.score + STARS_PER_PUZZLE && awarded)
            || (after.score == 0 && after.level == 1 && after.loading);

        if allowed {
            Ok(())
        } else {
            Err(Violation::new(
                self.kind(),
                format!(
                    "score {} -> {} with feedback {:?}",
                    before.score,
                    after.score,
                    after.feedback.as_ref().map(|feedback| feedback.kind())
                ),
            ))
        }
    }
}
