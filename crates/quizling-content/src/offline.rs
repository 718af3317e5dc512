//! Locally generated content.
//!
//! Used when no content service is configured. Arithmetic questions follow
//! the curriculum number ranges; vocabulary puzzles draw three pairs from a
//! built-in word bank for the level's theme.

use std::convert::Infallible;

use quizling_core::{
    ArithmeticContent, ContentProvider, ContentRequest, ContentResponse, Environment, GameMode,
    Operation, Theme, VocabularyContent, WordPair, curriculum,
};
use rand::{Rng, seq::SliceRandom};

/// Pairs in a generated vocabulary puzzle.
pub const PAIRS_PER_PUZZLE: usize = 3;

/// Wrong options offered next to the correct answer.
const DISTRACTORS: usize = 3;

/// Largest distance between a distractor and the correct answer.
const DISTRACTOR_SPREAD: u32 = 5;

/// Content generator that needs no network.
#[derive(Debug, Clone)]
pub struct OfflineProvider<E> {
    env: E,
}

impl<E: Environment> OfflineProvider<E> {
    /// Create a generator drawing randomness from `env`.
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// Generate content for `request` synchronously.
    pub fn generate(&self, request: ContentRequest) -> ContentResponse {
        let mut rng = self.env.rng();
        match request.mode {
            GameMode::Arithmetic => {
                let operation = curriculum::operations_for_level(request.level)
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(Operation::Addition);
                ContentResponse::Arithmetic(arithmetic(request.level, operation, &mut rng))
            },
            GameMode::Vocabulary => {
                let theme = curriculum::themes_for_level(request.level)
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(Theme::ObjectColors);
                ContentResponse::Vocabulary(vocabulary(theme, &mut rng))
            },
        }
    }
}

impl<E: Environment> ContentProvider for OfflineProvider<E> {
    type Error = Infallible;

    async fn fetch(&self, request: ContentRequest) -> Result<ContentResponse, Self::Error> {
        Ok(self.generate(request))
    }
}

/// Generate a question for `operation` at `level`.
///
/// Levels 1 and 2 use operands up to 10 and 20. Multiplication uses factors
/// 1-10 by 1-5; division uses the inverse, so dividends stay at or below 50
/// and quotients are whole. Subtraction never goes negative.
pub fn arithmetic<R: Rng + ?Sized>(level: u32, operation: Operation, rng: &mut R) -> ArithmeticContent {
    let max: u32 = if level == 2 { 20 } else { 10 };

    let (left, right, answer) = match operation {
        Operation::Addition => {
            let (a, b) = (rng.gen_range(1..=max), rng.gen_range(1..=max));
            (a, b, a + b)
        },
        Operation::Subtraction => {
            let a = rng.gen_range(1..=max);
            let b = rng.gen_range(1..=a);
            (a, b, a - b)
        },
        Operation::Multiplication => {
            let (a, b) = (rng.gen_range(1..=10), rng.gen_range(1..=5));
            (a, b, a * b)
        },
        Operation::Division => {
            let (quotient, divisor) = (rng.gen_range(1..=10), rng.gen_range(1..=5));
            (quotient * divisor, divisor, quotient)
        },
    };

    let mut candidates: Vec<u32> = (answer.saturating_sub(DISTRACTOR_SPREAD)..=answer + DISTRACTOR_SPREAD)
        .filter(|&candidate| candidate != answer)
        .collect();
    candidates.shuffle(rng);
    candidates.truncate(DISTRACTORS);
    candidates.push(answer);
    candidates.shuffle(rng);

    ArithmeticContent {
        operation,
        question_text: format!("{left} {} {right} = ?", operation.symbol()),
        correct_answer: answer.to_string(),
        options: candidates.iter().map(u32::to_string).collect(),
    }
}

/// Draw a puzzle of [`PAIRS_PER_PUZZLE`] pairs for `theme`.
pub fn vocabulary<R: Rng + ?Sized>(theme: Theme, rng: &mut R) -> VocabularyContent {
    let pairs = word_bank(theme)
        .choose_multiple(rng, PAIRS_PER_PUZZLE)
        .enumerate()
        .map(|(index, (term, value))| WordPair::new(format!("p{}", index + 1), *term, *value))
        .collect();

    VocabularyContent { prompt_text: theme.prompt_text().to_owned(), pairs }
}

/// Built-in pairs per theme. Terms and matches are unique within a theme.
fn word_bank(theme: Theme) -> &'static [(&'static str, &'static str)] {
    match theme {
        Theme::ObjectColors => &[
            ("Apple", "Red"),
            ("Banana", "Yellow"),
            ("Sky", "Blue"),
            ("Grass", "Green"),
            ("Snow", "White"),
            ("Grape", "Purple"),
            ("Pumpkin", "Orange"),
            ("Coal", "Black"),
        ],
        Theme::AnimalSounds => &[
            ("Dog", "Woof"),
            ("Cat", "Meow"),
            ("Cow", "Moo"),
            ("Duck", "Quack"),
            ("Sheep", "Baa"),
            ("Lion", "Roar"),
            ("Pig", "Oink"),
            ("Owl", "Hoot"),
        ],
        Theme::ActionObjects => &[
            ("Read", "Book"),
            ("Kick", "Ball"),
            ("Drink", "Water"),
            ("Ride", "Bike"),
            ("Brush", "Teeth"),
            ("Fly", "Kite"),
            ("Sing", "Song"),
            ("Bake", "Cake"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use quizling_core::{ArithmeticQuestion, PuzzleId, VocabularyPuzzle};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    const THEMES: [Theme; 3] = [Theme::ObjectColors, Theme::AnimalSounds, Theme::ActionObjects];

    fn evaluate(question: &str) -> u32 {
        let parts: Vec<&str> = question.split_whitespace().collect();
        let (a, b): (u32, u32) = (parts[0].parse().unwrap(), parts[2].parse().unwrap());
        match parts[1] {
            "+" => a + b,
            "-" => a - b,
            "x" => a * b,
            "/" => {
                assert_eq!(a % b, 0, "division must be whole: {question}");
                a / b
            },
            other => panic!("unknown operator {other}"),
        }
    }

    #[test]
    fn word_banks_have_unique_sides() {
        for theme in THEMES {
            let bank = word_bank(theme);
            assert!(bank.len() >= PAIRS_PER_PUZZLE);
            let terms: HashSet<_> = bank.iter().map(|(term, _)| term).collect();
            let matches: HashSet<_> = bank.iter().map(|(_, value)| value).collect();
            assert_eq!(terms.len(), bank.len(), "{theme:?}");
            assert_eq!(matches.len(), bank.len(), "{theme:?}");
        }
    }

    #[test]
    fn vocabulary_uses_theme_prompt() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let content = vocabulary(Theme::AnimalSounds, &mut rng);

        assert_eq!(content.prompt_text, "Match the animal to its sound:");
        assert_eq!(content.pairs.len(), PAIRS_PER_PUZZLE);
        let ids: Vec<_> = content.pairs.iter().map(|pair| pair.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2", "p3"]);
    }

    proptest! {
        #[test]
        fn prop_arithmetic_is_valid(seed in any::<u64>(), level in 1u32..=3) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for &operation in curriculum::operations_for_level(level) {
                let content = arithmetic(level, operation, &mut rng);
                let answer = evaluate(&content.question_text);
                prop_assert_eq!(content.correct_answer.clone(), answer.to_string());
                prop_assert!(ArithmeticQuestion::new(PuzzleId(0), content).is_ok());
            }
        }

        #[test]
        fn prop_operands_follow_level_range(seed in any::<u64>(), level in 1u32..=2) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let max: u32 = if level == 2 { 20 } else { 10 };
            for operation in [Operation::Addition, Operation::Subtraction] {
                let content = arithmetic(level, operation, &mut rng);
                let parts: Vec<&str> = content.question_text.split_whitespace().collect();
                let (a, b): (u32, u32) = (parts[0].parse().unwrap(), parts[2].parse().unwrap());
                prop_assert!((1..=max).contains(&a) && (1..=max).contains(&b), "{}", content.question_text);

                let answer: u32 = content.correct_answer.parse().unwrap();
                for option in &content.options {
                    let option: u32 = option.parse().unwrap();
                    prop_assert!(option.abs_diff(answer) <= DISTRACTOR_SPREAD);
                }
            }
        }

        #[test]
        fn prop_level_three_stays_small(seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let content = arithmetic(3, Operation::Division, &mut rng);
            let dividend: u32 = content.question_text.split_whitespace().next().unwrap().parse().unwrap();
            prop_assert!(dividend <= 50);
        }

        #[test]
        fn prop_vocabulary_is_valid(seed in any::<u64>(), theme in prop::sample::select(THEMES.to_vec())) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let content = vocabulary(theme, &mut rng);
            prop_assert!(VocabularyPuzzle::new(PuzzleId(0), content, &mut rng).is_ok());
        }
    }
}
