//! Session controller state machine.
//!
//! This module defines the [`Session`] state machine, which owns all mutable
//! game state for one play session completely decoupled from I/O.
//!
//! This is a pure state machine: it consumes [`crate::SessionEvent`] inputs
//! and produces [`crate::SessionAction`] instructions for the runtime to
//! execute.
//!
//! # Responsibilities
//!
//! - Drives content fetches and discards completions from superseded fetches.
//! - Evaluates arithmetic answers and incremental vocabulary matches.
//! - Applies the shared scoring rule and the level-up/game-over transitions.
//! - Schedules and cancels dismissal timers for transient feedback.
//!
//! Intents whose preconditions are not met are silent no-ops and return no
//! actions.

use std::collections::HashMap;

use quizling_core::{
    Award, ConfigError, ContentRequest, Feedback, GameConfig, GameMode, Puzzle, Scoreboard,
};

use crate::{
    ArithmeticState, FetchTicket, Interaction, SessionAction, SessionEvent, SessionView, TimerId,
    VocabularyState,
};

/// Player-facing message for any fetch that produced no usable puzzle.
pub const RETRY_MESSAGE: &str = "Oops! We couldn't prepare a new puzzle. Please try again.";

/// Session controller.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct Session {
    /// Game rules.
    config: GameConfig,
    /// Active mode. `None` until the first `initialize`.
    mode: Option<GameMode>,
    /// Level, score, and per-level progress.
    board: Scoreboard,
    /// Puzzle being played.
    puzzle: Option<Puzzle>,
    /// A fetch is in flight.
    loading: bool,
    /// Player-facing error message.
    last_error: Option<String>,
    /// Pending feedback.
    feedback: Option<Feedback>,
    /// Quota reached on a level below the maximum.
    level_complete: bool,
    /// Quota reached on the final level.
    game_over: bool,
    /// Vocabulary term awaiting a match.
    selected_term: Option<String>,
    /// Vocabulary pairs matched in the current puzzle (term → match).
    matched_pairs: HashMap<String, String>,
    /// Generation of the most recent fetch.
    generation: u64,
    /// Next dismissal timer identifier.
    next_timer: u64,
    /// Dismissal timer currently armed.
    pending_dismiss: Option<TimerId>,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_config(GameConfig::default())
    }
}

impl Session {
    /// Create a session with validated rules.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: GameConfig) -> Self {
        Self {
            config,
            mode: None,
            board: Scoreboard::new(),
            puzzle: None,
            loading: false,
            last_error: None,
            feedback: None,
            level_complete: false,
            game_over: false,
            selected_term: None,
            matched_pairs: HashMap::new(),
            generation: 0,
            next_timer: 0,
            pending_dismiss: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionAction> {
        match event {
            SessionEvent::Initialize { mode } => self.initialize(mode),
            SessionEvent::SubmitAnswer { choice } => self.submit_answer(&choice),
            SessionEvent::SelectTerm { term } => self.select_term(&term),
            SessionEvent::SelectMatch { value } => self.select_match(&value),
            SessionEvent::Proceed => self.proceed(),
            SessionEvent::ResetFeedback => self.reset_feedback(),
            SessionEvent::ContentLoaded { generation, puzzle } => {
                self.content_loaded(generation, puzzle)
            },
            SessionEvent::ContentFailed { generation, reason } => {
                self.content_failed(generation, &reason)
            },
            SessionEvent::DismissElapsed { timer } => self.dismiss_elapsed(timer),
            SessionEvent::Quit => vec![SessionAction::Quit],
        }
    }

    /// Start a fresh session in `mode`, superseding any fetch in flight.
    pub fn initialize(&mut self, mode: GameMode) -> Vec<SessionAction> {
        tracing::info!(%mode, "starting session");

        let mut actions = Vec::new();
        self.mode = Some(mode);
        self.board = Scoreboard::new();
        self.level_complete = false;
        self.game_over = false;
        self.start_fetch(&mut actions);
        actions
    }

    /// Answer the current arithmetic question.
    ///
    /// Ignored unless an arithmetic puzzle is shown with no feedback pending.
    pub fn submit_answer(&mut self, choice: &str) -> Vec<SessionAction> {
        let Some(Puzzle::Arithmetic(question)) = &self.puzzle else {
            return vec![];
        };
        if self.feedback.is_some() {
            return vec![];
        }

        let correct = question.is_correct(choice);
        let miss = Feedback::incorrect(question.correct_answer());

        let mut actions = Vec::new();
        if correct {
            self.award(&mut actions);
        } else {
            tracing::debug!(choice, "wrong answer");
            self.set_feedback(miss, &mut actions);
        }
        actions.push(SessionAction::Render);
        actions
    }

    /// Select a vocabulary term, replacing any previous selection.
    ///
    /// Ignored for terms already matched, terms not in the puzzle, or while
    /// blocking feedback is shown.
    pub fn select_term(&mut self, term: &str) -> Vec<SessionAction> {
        let Some(Puzzle::Vocabulary(puzzle)) = &self.puzzle else {
            return vec![];
        };
        if !puzzle.has_term(term)
            || self.matched_pairs.contains_key(term)
            || self.has_blocking_feedback()
        {
            return vec![];
        }

        self.selected_term = Some(term.to_owned());
        vec![SessionAction::Render]
    }

    /// Pair the selected term with `value`.
    ///
    /// Ignored without a selected term, for a value already used by a matched
    /// pair, once every pair is matched, or while blocking feedback is shown.
    pub fn select_match(&mut self, value: &str) -> Vec<SessionAction> {
        let Some(Puzzle::Vocabulary(puzzle)) = &self.puzzle else {
            return vec![];
        };
        let Some(term) = self.selected_term.clone() else {
            return vec![];
        };
        let pair_count = puzzle.pair_count();
        if self.has_blocking_feedback()
            || self.matched_pairs.len() >= pair_count
            || self.matched_pairs.values().any(|used| used == value)
        {
            return vec![];
        }
        let correct = puzzle.match_for(&term) == Some(value);

        let mut actions = Vec::new();
        self.selected_term = None;
        if correct {
            self.matched_pairs.insert(term, value.to_owned());
            if self.matched_pairs.len() == pair_count {
                self.award(&mut actions);
            } else {
                self.set_feedback(Feedback::good_match(), &mut actions);
            }
        } else {
            tracing::debug!(term, value, "wrong match");
            self.set_feedback(Feedback::mismatch(), &mut actions);
        }
        actions.push(SessionAction::Render);
        actions
    }

    /// Acknowledge blocking feedback.
    ///
    /// After game over this clears the puzzle and fetches nothing. After a
    /// completed level it advances and fetches the next level. Otherwise it
    /// fetches a new puzzle for the same level. Ignored without blocking
    /// feedback.
    pub fn proceed(&mut self) -> Vec<SessionAction> {
        if self.loading || !self.has_blocking_feedback() {
            return vec![];
        }

        let mut actions = Vec::new();
        self.clear_feedback(&mut actions);

        if self.game_over {
            self.puzzle = None;
            actions.push(SessionAction::SessionFinished { final_score: self.board.score() });
            actions.push(SessionAction::Render);
            return actions;
        }

        if self.level_complete {
            self.board.advance_level();
            self.level_complete = false;
            tracing::info!(level = self.board.level(), "advancing level");
        }
        self.start_fetch(&mut actions);
        actions
    }

    /// Dismiss transient feedback. No-op for blocking or absent feedback.
    pub fn reset_feedback(&mut self) -> Vec<SessionAction> {
        if !self.feedback.as_ref().is_some_and(Feedback::is_transient) {
            return vec![];
        }

        let mut actions = Vec::new();
        self.clear_feedback(&mut actions);
        actions.push(SessionAction::Render);
        actions
    }

    fn content_loaded(&mut self, generation: u64, puzzle: Puzzle) -> Vec<SessionAction> {
        if !self.is_current_fetch(generation) {
            tracing::debug!(generation, current = self.generation, "discarding stale content");
            return vec![];
        }
        if self.mode != Some(puzzle.mode()) {
            let reason = format!("received {} content", puzzle.mode());
            return self.content_failed(generation, &reason);
        }

        tracing::debug!(generation, puzzle = %puzzle.id(), "content loaded");
        self.loading = false;
        self.puzzle = Some(puzzle);
        vec![SessionAction::Render]
    }

    fn content_failed(&mut self, generation: u64, reason: &str) -> Vec<SessionAction> {
        if !self.is_current_fetch(generation) {
            tracing::debug!(generation, current = self.generation, "discarding stale failure");
            return vec![];
        }

        tracing::warn!(generation, reason, "content fetch failed");
        self.loading = false;
        self.puzzle = None;
        self.last_error = Some(RETRY_MESSAGE.to_owned());
        vec![SessionAction::Render]
    }

    fn dismiss_elapsed(&mut self, timer: TimerId) -> Vec<SessionAction> {
        if self.pending_dismiss != Some(timer) {
            return vec![];
        }

        self.pending_dismiss = None;
        if self.feedback.as_ref().is_some_and(Feedback::is_transient) {
            self.feedback = None;
        }
        vec![SessionAction::Render]
    }

    fn start_fetch(&mut self, actions: &mut Vec<SessionAction>) {
        let Some(mode) = self.mode else {
            return;
        };

        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        self.puzzle = None;
        self.last_error = None;
        self.clear_feedback(actions);
        self.selected_term = None;
        self.matched_pairs.clear();

        let level = self.board.level();
        tracing::debug!(generation = self.generation, %mode, level, "fetching content");
        actions.push(SessionAction::FetchContent(FetchTicket {
            generation: self.generation,
            request: ContentRequest { mode, level },
        }));
        actions.push(SessionAction::Render);
    }

    fn award(&mut self, actions: &mut Vec<SessionAction>) {
        let award = self.board.record_correct(&self.config);
        match award {
            Award::Correct => {},
            Award::LevelUp { next_level } => {
                tracing::info!(next_level, score = self.board.score(), "level complete");
                self.level_complete = true;
            },
            Award::GameOver { final_score } => {
                tracing::info!(final_score, "game over");
                self.game_over = true;
            },
        }
        self.set_feedback(Feedback::for_award(award), actions);
    }

    fn set_feedback(&mut self, feedback: Feedback, actions: &mut Vec<SessionAction>) {
        self.cancel_dismiss(actions);
        if let Some(after) = self.config.dismiss_delay(feedback.kind()) {
            let timer = TimerId(self.next_timer);
            self.next_timer = self.next_timer.wrapping_add(1);
            self.pending_dismiss = Some(timer);
            actions.push(SessionAction::ScheduleDismiss { timer, after });
        }
        self.feedback = Some(feedback);
    }

    fn clear_feedback(&mut self, actions: &mut Vec<SessionAction>) {
        self.cancel_dismiss(actions);
        self.feedback = None;
    }

    fn cancel_dismiss(&mut self, actions: &mut Vec<SessionAction>) {
        if let Some(timer) = self.pending_dismiss.take() {
            actions.push(SessionAction::CancelDismiss { timer });
        }
    }

    fn is_current_fetch(&self, generation: u64) -> bool {
        self.loading && generation == self.generation
    }

    fn has_blocking_feedback(&self) -> bool {
        self.feedback.as_ref().is_some_and(Feedback::is_blocking)
    }

    /// Derived interaction state.
    pub fn interaction(&self) -> Interaction {
        if self.loading {
            return Interaction::Loading;
        }
        if self.last_error.is_some() {
            return Interaction::Unavailable;
        }

        match &self.puzzle {
            None if self.game_over => Interaction::Finished,
            None => Interaction::Idle,
            Some(Puzzle::Arithmetic(_)) => Interaction::Arithmetic(match self.feedback {
                Some(_) => ArithmeticState::FeedbackShown,
                None => ArithmeticState::AwaitingAnswer,
            }),
            Some(Puzzle::Vocabulary(_)) => Interaction::Vocabulary(match &self.feedback {
                Some(feedback) if feedback.is_blocking() => VocabularyState::BlockingFeedback,
                Some(_) => VocabularyState::TransientFeedback,
                None if self.selected_term.is_some() => VocabularyState::TermSelected,
                None => VocabularyState::NoSelection,
            }),
        }
    }

    /// Owned snapshot for renderers and invariant checks.
    pub fn view(&self) -> SessionView {
        SessionView {
            mode: self.mode,
            level: self.board.level(),
            score: self.board.score(),
            correct_in_level: self.board.correct_in_level(),
            puzzle: self.puzzle.clone(),
            loading: self.loading,
            last_error: self.last_error.clone(),
            feedback: self.feedback.clone(),
            level_complete: self.level_complete,
            game_over: self.game_over,
            selected_term: self.selected_term.clone(),
            matched_pairs: self
                .matched_pairs
                .iter()
                .map(|(term, value)| (term.clone(), value.clone()))
                .collect(),
            interaction: self.interaction(),
        }
    }

    /// Game rules.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Active mode. `None` until the first `initialize`.
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Current level, starting at 1.
    pub fn level(&self) -> u32 {
        self.board.level()
    }

    /// Stars collected.
    pub fn score(&self) -> u32 {
        self.board.score()
    }

    /// Correct completions in the current level.
    pub fn correct_in_level(&self) -> u32 {
        self.board.correct_in_level()
    }

    /// Puzzle being played.
    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    /// A fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Player-facing error message.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Pending feedback.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Quota reached on a level below the maximum.
    pub fn is_level_complete(&self) -> bool {
        self.level_complete
    }

    /// Quota reached on the final level.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Vocabulary term awaiting a match.
    pub fn selected_term(&self) -> Option<&str> {
        self.selected_term.as_deref()
    }

    /// Vocabulary pairs matched so far (term → match).
    pub fn matched_pairs(&self) -> &HashMap<String, String> {
        &self.matched_pairs
    }

    /// Generation of the most recent fetch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Dismissal timer currently armed.
    pub fn pending_dismiss(&self) -> Option<TimerId> {
        self.pending_dismiss
    }
}
