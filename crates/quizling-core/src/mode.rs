//! Game modes and arithmetic operations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which kind of puzzle a session plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Multiple-choice arithmetic questions.
    Arithmetic,
    /// Term/match vocabulary puzzles.
    Vocabulary,
}

impl GameMode {
    /// Both modes, in menu order.
    pub const ALL: [Self; 2] = [Self::Arithmetic, Self::Vocabulary];

    /// Short human-readable title for menus and status bars.
    pub fn title(self) -> &'static str {
        match self {
            Self::Arithmetic => "Math Puzzles",
            Self::Vocabulary => "Word Match",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arithmetic => f.write_str("arithmetic"),
            Self::Vocabulary => f.write_str("vocabulary"),
        }
    }
}

/// Arithmetic operation an [`crate::ArithmeticQuestion`] exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// `a + b`
    Addition,
    /// `a - b`
    Subtraction,
    /// `a x b`
    Multiplication,
    /// `a / b`, whole-number result
    Division,
}

impl Operation {
    /// Symbol used in question text.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Addition => "+",
            Self::Subtraction => "-",
            Self::Multiplication => "x",
            Self::Division => "/",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Addition => f.write_str("addition"),
            Self::Subtraction => f.write_str("subtraction"),
            Self::Multiplication => f.write_str("multiplication"),
            Self::Division => f.write_str("division"),
        }
    }
}
