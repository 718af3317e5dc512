//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use quizling_app::{Driver, Session, SessionEvent};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{
    input::{InputState, KeyInput, KeyOutcome},
    ui,
};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the input line; edits are redrawn locally and only complete
/// intents reach the session.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    input_state: InputState,
    restored: bool,
}

impl TerminalDriver {
    /// Enter raw mode and the alternate screen.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            event_stream: EventStream::new(),
            input_state: InputState::new(),
            restored: false,
        })
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self, session: &Session) -> Result<Option<SessionEvent>, Self::Error> {
        // Key handling runs synchronously after each await, so dropping this
        // future between keys loses nothing.
        loop {
            match self.event_stream.next().await {
                Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                    let Some(key) = Self::convert_key(key_event.code) else { continue };
                    match self.input_state.handle_key(key, session) {
                        KeyOutcome::Event(event) => return Ok(Some(event)),
                        KeyOutcome::Redraw => self.render(session)?,
                        KeyOutcome::Ignored => {},
                    }
                },
                Some(Ok(Event::Resize(..))) => self.render(session)?,
                Some(Ok(_)) => {},
                Some(Err(e)) => return Err(TerminalError::Io(e)),
                None => return Ok(None),
            }
        }
    }

    fn render(&mut self, session: &Session) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, session, &self.input_state);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}
