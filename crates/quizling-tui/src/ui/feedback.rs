//! Feedback line
//!
//! Shows the session's feedback, or failing that the input line's hint.

use quizling_app::Session;
use quizling_core::{Feedback, FeedbackKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::InputState;

/// Render the feedback panel.
pub fn render(frame: &mut Frame, session: &Session, input: &InputState, area: Rect) {
    let lines = match session.feedback() {
        Some(feedback) => feedback_lines(feedback),
        None => input
            .hint()
            .map(|hint| vec![Line::styled(hint.to_owned(), Style::default().fg(Color::DarkGray))])
            .unwrap_or_default(),
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP)).wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn feedback_lines(feedback: &Feedback) -> Vec<Line<'static>> {
    let color = match feedback.kind() {
        FeedbackKind::Correct | FeedbackKind::LevelUp | FeedbackKind::GoodMatch => Color::Green,
        FeedbackKind::GameOver => Color::Magenta,
        FeedbackKind::Incorrect | FeedbackKind::Mismatch => Color::Red,
    };

    let prompt = if feedback.is_blocking() { "  (/next to continue)" } else { "  (/ok to dismiss)" };

    vec![
        Line::from(vec![
            Span::styled(
                feedback.headline(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(prompt, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(feedback.detail().to_owned()),
    ]
}
