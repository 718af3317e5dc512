//! Fuzz target for generated-content parsing
//!
//! # Strategy
//!
//! - Random text, with and without a markdown code fence
//! - Every curriculum topic, so both arithmetic and vocabulary shapes parse
//!
//! # Invariants
//!
//! - Parsing returns `Ok` or `Err`, NEVER panics
//! - Parsed content has the mode its topic asked for

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quizling_content::remote::{Topic, parse_content};
use quizling_core::{GameMode, Operation, Theme};

#[derive(Debug, Arbitrary)]
struct Input {
    topic: u8,
    fenced: bool,
    text: String,
}

const TOPICS: [Topic; 7] = [
    Topic::Operation(Operation::Addition),
    Topic::Operation(Operation::Subtraction),
    Topic::Operation(Operation::Multiplication),
    Topic::Operation(Operation::Division),
    Topic::Theme(Theme::ObjectColors),
    Topic::Theme(Theme::AnimalSounds),
    Topic::Theme(Theme::ActionObjects),
];

fuzz_target!(|input: Input| {
    let topic = TOPICS[usize::from(input.topic) % TOPICS.len()];
    let text = if input.fenced { format!("```json\n{}\n```", input.text) } else { input.text };

    if let Ok(content) = parse_content(topic, &text) {
        let expected = match topic {
            Topic::Operation(_) => GameMode::Arithmetic,
            Topic::Theme(_) => GameMode::Vocabulary,
        };
        assert_eq!(content.mode(), expected);
    }
});
