//! Input state and key handling for the TUI.
//!
//! This module owns all text input state (buffer, cursor, hint) and handles
//! character-level key events. Command parsing happens here on Enter, where
//! numbered selections are resolved against the puzzle on screen.

use quizling_app::{Session, SessionEvent};
use quizling_core::{Feedback, GameMode, Puzzle};

use crate::commands::{self, Command};

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Escape key.
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Result of handling one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Forward an intent to the session.
    Event(SessionEvent),
    /// Only the input line or hint changed.
    Redraw,
    /// Nothing changed.
    Ignored,
}

/// Input state for the TUI.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
    hint: Option<String>,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Local message about the last input line, if it could not be used.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Handle a key input event.
    pub fn handle_key(&mut self, key: KeyInput, session: &Session) -> KeyOutcome {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_index();
                self.buffer.insert(at, c);
                self.cursor = self.cursor.saturating_add(1);
                KeyOutcome::Redraw
            },
            KeyInput::Backspace => {
                if self.cursor == 0 {
                    return KeyOutcome::Ignored;
                }
                self.cursor -= 1;
                let at = self.byte_index();
                self.buffer.remove(at);
                KeyOutcome::Redraw
            },
            KeyInput::Delete => {
                if self.cursor >= self.char_count() {
                    return KeyOutcome::Ignored;
                }
                let at = self.byte_index();
                self.buffer.remove(at);
                KeyOutcome::Redraw
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                KeyOutcome::Redraw
            },
            KeyInput::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                KeyOutcome::Redraw
            },
            KeyInput::Home => {
                self.cursor = 0;
                KeyOutcome::Redraw
            },
            KeyInput::End => {
                self.cursor = self.char_count();
                KeyOutcome::Redraw
            },
            KeyInput::Enter => self.handle_enter(session),
            KeyInput::Esc => KeyOutcome::Event(SessionEvent::Quit),
        }
    }

    /// Handle Enter: parse the line and turn it into a session intent.
    fn handle_enter(&mut self, session: &Session) -> KeyOutcome {
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;

        let Some(command) = commands::parse(&text) else {
            return KeyOutcome::Redraw;
        };

        match resolve(command, session) {
            Ok(event) => {
                self.hint = None;
                KeyOutcome::Event(event)
            },
            Err(hint) => {
                self.hint = Some(hint);
                KeyOutcome::Redraw
            },
        }
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.buffer.char_indices().nth(self.cursor).map_or(self.buffer.len(), |(index, _)| index)
    }
}

/// Turn a parsed command into an event, or explain why it cannot be used.
fn resolve(command: Command, session: &Session) -> Result<SessionEvent, String> {
    match command {
        Command::Math => Ok(SessionEvent::Initialize { mode: GameMode::Arithmetic }),
        Command::Words => Ok(SessionEvent::Initialize { mode: GameMode::Vocabulary }),
        Command::Next => Ok(SessionEvent::Proceed),
        Command::Dismiss => Ok(SessionEvent::ResetFeedback),
        Command::Quit => Ok(SessionEvent::Quit),
        Command::SelectTerm { index } => {
            let Some(Puzzle::Vocabulary(puzzle)) = session.puzzle() else {
                return Err("No word puzzle on screen".into());
            };
            puzzle
                .terms()
                .get(index - 1)
                .map(|term| SessionEvent::SelectTerm { term: term.clone() })
                .ok_or_else(|| format!("There is no word {index}"))
        },
        Command::SelectMatch { index } => {
            let Some(Puzzle::Vocabulary(puzzle)) = session.puzzle() else {
                return Err("No word puzzle on screen".into());
            };
            // Matches stay locked until a match result clears
            if session.feedback().is_some_and(Feedback::is_transient) {
                return Err("Wait a moment...".into());
            }
            puzzle
                .matches()
                .get(index - 1)
                .map(|value| SessionEvent::SelectMatch { value: value.clone() })
                .ok_or_else(|| format!("There is no match {index}"))
        },
        Command::Answer { text } => match session.puzzle() {
            Some(Puzzle::Arithmetic(_)) => Ok(SessionEvent::SubmitAnswer { choice: text }),
            Some(Puzzle::Vocabulary(_)) => Err("Pick words with t <n> and matches with m <n>".into()),
            None => Err("Start with /math or /words".into()),
        },
        Command::Unknown { input } => Err(format!("Unknown command: {input}")),
        Command::InvalidArgs { command, error } => Err(format!("{command}: {error}")),
    }
}
