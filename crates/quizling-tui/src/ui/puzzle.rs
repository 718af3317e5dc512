//! Puzzle panel
//!
//! Draws whatever the current interaction calls for: the welcome text, a
//! loading notice, the retry message, an arithmetic question or a
//! vocabulary board.

use quizling_app::{Interaction, Session};
use quizling_core::{ArithmeticQuestion, Puzzle, VocabularyPuzzle};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the puzzle panel.
pub fn render(frame: &mut Frame, session: &Session, area: Rect) {
    let lines = match (session.interaction(), session.puzzle()) {
        (Interaction::Idle, _) => vec![
            Line::from("Welcome to Quizling!"),
            Line::default(),
            Line::from("Type /math for math puzzles or /words for word matching."),
        ],
        (Interaction::Loading, _) => vec![Line::styled(
            "Preparing your puzzle...",
            Style::default().fg(Color::Yellow),
        )],
        (Interaction::Unavailable, _) => vec![
            Line::styled(
                session.last_error().unwrap_or_default().to_owned(),
                Style::default().fg(Color::Red),
            ),
            Line::default(),
            Line::from("Type /math or /words to try again."),
        ],
        (Interaction::Finished, _) => vec![
            Line::styled(
                format!("Game complete! You collected {} stars.", session.score()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::from("Type /math or /words to play again."),
        ],
        (_, Some(Puzzle::Arithmetic(question))) => arithmetic_lines(question),
        (_, Some(Puzzle::Vocabulary(puzzle))) => vocabulary_lines(session, puzzle),
        (_, None) => Vec::new(),
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Puzzle "))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn arithmetic_lines(question: &ArithmeticQuestion) -> Vec<Line<'static>> {
    let mut options = vec![Span::raw("  ")];
    for option in question.options() {
        options.push(Span::styled(
            format!("[ {option} ]"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        options.push(Span::raw("  "));
    }

    vec![
        Line::styled(question.question_text().to_owned(), Style::default().add_modifier(Modifier::BOLD)),
        Line::default(),
        Line::from(options),
        Line::default(),
        Line::styled("Type your answer and press Enter.", Style::default().fg(Color::DarkGray)),
    ]
}

fn vocabulary_lines(session: &Session, puzzle: &VocabularyPuzzle) -> Vec<Line<'static>> {
    const COLUMN_WIDTH: usize = 24;

    let matched = session.matched_pairs();
    let selected = session.selected_term();

    let mut lines = vec![
        Line::styled(puzzle.prompt_text().to_owned(), Style::default().add_modifier(Modifier::BOLD)),
        Line::default(),
    ];

    for (index, (term, value)) in puzzle.terms().iter().zip(puzzle.matches()).enumerate() {
        let number = index + 1;

        let term_style = if matched.contains_key(term) {
            Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
        } else if selected == Some(term.as_str()) {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default()
        };
        let value_style = if matched.values().any(|m| m == value) {
            Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };

        let term_text = format!("{number}. {term}");
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{term_text:<COLUMN_WIDTH$}"), term_style),
            Span::styled(format!("{number}. {value}"), value_style),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::styled(
        "Pick a word with t <n>, then its match with m <n>.",
        Style::default().fg(Color::DarkGray),
    ));
    lines
}
