//! Canned content for tests.

use quizling_core::{
    ArithmeticContent, ContentResponse, Operation, Puzzle, PuzzleId, VocabularyContent, WordPair,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// `1 + 1 = ?` with options 1-4.
pub fn one_plus_one() -> ContentResponse {
    arithmetic("1 + 1 = ?", "2", ["1", "2", "3", "4"])
}

/// An addition question with the given text, answer and options.
pub fn arithmetic(question: &str, answer: &str, options: [&str; 4]) -> ContentResponse {
    ContentResponse::Arithmetic(ArithmeticContent {
        operation: Operation::Addition,
        question_text: question.to_owned(),
        correct_answer: answer.to_owned(),
        options: options.into_iter().map(str::to_owned).collect(),
    })
}

/// Apple/Red, Banana/Yellow, Sky/Blue.
pub fn fruit_colors() -> ContentResponse {
    vocabulary(&[("Apple", "Red"), ("Banana", "Yellow"), ("Sky", "Blue")])
}

/// The correct pairs of [`fruit_colors`].
pub const FRUIT_PAIRS: [(&str, &str); 3] = [("Apple", "Red"), ("Banana", "Yellow"), ("Sky", "Blue")];

/// A vocabulary puzzle over `pairs`.
pub fn vocabulary(pairs: &[(&str, &str)]) -> ContentResponse {
    ContentResponse::Vocabulary(VocabularyContent {
        prompt_text: "Match the object to its color:".to_owned(),
        pairs: pairs
            .iter()
            .enumerate()
            .map(|(index, (term, value))| WordPair::new(format!("p{}", index + 1), *term, *value))
            .collect(),
    })
}

/// Assemble `response` as the puzzle for fetch `generation`.
///
/// # Panics
///
/// Panics if the content is invalid; fixtures are expected to be valid.
#[allow(clippy::expect_used, reason = "fixtures are hand-written valid content")]
pub fn puzzle(response: ContentResponse, generation: u64) -> Puzzle {
    let mut rng = ChaCha8Rng::seed_from_u64(generation);
    Puzzle::assemble(PuzzleId(generation), response, &mut rng).expect("fixture content is valid")
}
