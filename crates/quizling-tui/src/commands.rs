//! Input line command parsing.
//!
//! Slash commands control the session; `t <n>` and `m <n>` pick vocabulary
//! terms and matches by their displayed number; anything else is an answer.

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/math`: start an arithmetic session.
    Math,
    /// `/words`: start a vocabulary session.
    Words,
    /// `/next`: acknowledge feedback and continue.
    Next,
    /// `/ok`: dismiss a transient message early.
    Dismiss,
    /// `/quit`
    Quit,
    /// `t <n>`: select the n-th term (1-based).
    SelectTerm {
        /// Displayed number.
        index: usize,
    },
    /// `m <n>`: pair the selected term with the n-th match (1-based).
    SelectMatch {
        /// Displayed number.
        index: usize,
    },
    /// Any other text: an arithmetic answer.
    Answer {
        /// Answer text, trimmed.
        text: String,
    },
    /// A slash command that does not exist.
    Unknown {
        /// The full input.
        input: String,
    },
    /// A known command with bad arguments.
    InvalidArgs {
        /// Command name.
        command: &'static str,
        /// What was wrong.
        error: String,
    },
}

/// Parse one input line. Blank input yields `None`.
pub fn parse(input: &str) -> Option<Command> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(name) = input.strip_prefix('/') {
        let command = match name.trim().to_ascii_lowercase().as_str() {
            "math" => Command::Math,
            "words" => Command::Words,
            "next" | "n" => Command::Next,
            "ok" => Command::Dismiss,
            "quit" | "q" => Command::Quit,
            _ => Command::Unknown { input: input.to_owned() },
        };
        return Some(command);
    }

    let mut words = input.split_whitespace();
    let command = match (words.next(), words.next(), words.next()) {
        (Some("t"), Some(n), None) => {
            parse_index("t", n).map_or_else(|e| e, |index| Command::SelectTerm { index })
        },
        (Some("m"), Some(n), None) => {
            parse_index("m", n).map_or_else(|e| e, |index| Command::SelectMatch { index })
        },
        (Some(name @ ("t" | "m")), None, None) => Command::InvalidArgs {
            command: if name == "t" { "t" } else { "m" },
            error: "expected a number".into(),
        },
        _ => Command::Answer { text: input.to_owned() },
    };
    Some(command)
}

fn parse_index(command: &'static str, raw: &str) -> Result<usize, Command> {
    match raw.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(Command::InvalidArgs { command, error: format!("{raw:?} is not a number from 1") }),
    }
}
