//! UI rendering
//!
//! Rendering functions that convert session state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into a frame.

mod feedback;
mod input;
mod puzzle;
mod status;

use quizling_app::Session;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::InputState;

/// Render the entire UI.
pub fn render(frame: &mut Frame, session: &Session, input_state: &InputState) {
    const STATUS_HEIGHT: u16 = 1;
    const PUZZLE_MIN_HEIGHT: u16 = 6;
    const FEEDBACK_HEIGHT: u16 = 4;
    const INPUT_HEIGHT: u16 = 3;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Min(PUZZLE_MIN_HEIGHT),
            Constraint::Length(FEEDBACK_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .split(frame.area());

    let [status_area, puzzle_area, feedback_area, input_area] = chunks.as_ref() else {
        return;
    };

    status::render(frame, session, *status_area);
    puzzle::render(frame, session, *puzzle_area);
    feedback::render(frame, session, input_state, *feedback_area);
    input::render(frame, input_state, *input_area);
}
