//! Status bar
//!
//! Displays the mode, level, progress and star count.

use quizling_app::Session;
use quizling_core::curriculum;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, session: &Session, area: Rect) {
    let mode = session.mode().map_or_else(
        || Span::styled("Quizling", Style::default().fg(Color::Cyan)),
        |mode| {
            Span::styled(
                mode.title(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        },
    );

    let level_info = session.mode().map_or_else(String::new, |mode| {
        let level = session.level();
        let description = curriculum::level_description(mode, level)
            .map_or_else(|| format!("Level {level}"), str::to_owned);
        let quota = session.config().questions_to_level_up;
        format!(" | {description} | {}/{quota}", session.correct_in_level())
    });

    let status_line = Line::from(vec![
        Span::raw(" "),
        mode,
        Span::raw(level_info),
        Span::styled(
            format!(" | Stars: {}", session.score()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
