//! What each level teaches.
//!
//! Providers consult these tables to decide which operation or theme to ask
//! for. Levels outside the table fall back to level 1.

use crate::{GameMode, Operation};

/// Vocabulary puzzle theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Everyday objects and their colors.
    ObjectColors,
    /// Animals and the sounds they make.
    AnimalSounds,
    /// Action verbs and the objects they act on.
    ActionObjects,
}

impl Theme {
    /// Theme description used when asking a generative provider.
    pub fn description(self) -> &'static str {
        match self {
            Self::ObjectColors => "common objects and their colors",
            Self::AnimalSounds => "animals and their sounds",
            Self::ActionObjects => "simple action verbs and objects",
        }
    }

    /// Instruction shown above a puzzle of this theme.
    pub fn prompt_text(self) -> &'static str {
        match self {
            Self::ObjectColors => "Match the object to its color:",
            Self::AnimalSounds => "Match the animal to its sound:",
            Self::ActionObjects => "Match the item to its pair:",
        }
    }
}

/// Operations practised at `level`.
pub fn operations_for_level(level: u32) -> &'static [Operation] {
    match level {
        3 => &[Operation::Multiplication, Operation::Division],
        _ => &[Operation::Addition, Operation::Subtraction],
    }
}

/// Themes practised at `level`.
pub fn themes_for_level(level: u32) -> &'static [Theme] {
    match level {
        2 => &[Theme::AnimalSounds],
        3 => &[Theme::ActionObjects],
        _ => &[Theme::ObjectColors],
    }
}

/// Menu/status description of a level, if the curriculum names it.
pub fn level_description(mode: GameMode, level: u32) -> Option<&'static str> {
    match (mode, level) {
        (GameMode::Arithmetic, 1) => Some("Level 1: Easy Sums & Differences (1-10)"),
        (GameMode::Arithmetic, 2) => Some("Level 2: More Sums & Differences (1-20)"),
        (GameMode::Arithmetic, 3) => Some("Level 3: Fun Multiplication & Division"),
        (GameMode::Vocabulary, 1) => Some("Level 1: Colors & Objects"),
        (GameMode::Vocabulary, 2) => Some("Level 2: Animal Sounds"),
        (GameMode::Vocabulary, 3) => Some("Level 3: Actions & Things"),
        _ => None,
    }
}
