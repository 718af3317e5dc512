//! Puzzle content.
//!
//! Providers answer a [`ContentRequest`] with a loosely-checked
//! [`ContentResponse`]. Assembly turns a response into a validated, immutable
//! [`Puzzle`]: arithmetic options are checked for shape and uniqueness, and
//! vocabulary matches are shuffled for display independently of the terms.

use std::{collections::HashSet, fmt};

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::{ContentError, GameMode, Operation};

/// Number of answer options on an arithmetic question.
pub const OPTION_COUNT: usize = 4;

/// Identifier of a fetched puzzle instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PuzzleId(pub u64);

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "puzzle-{}", self.0)
    }
}

/// Request sent to a content provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRequest {
    /// Kind of puzzle wanted.
    pub mode: GameMode,
    /// Difficulty level, starting at 1.
    pub level: u32,
}

/// Raw arithmetic question as produced by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArithmeticContent {
    /// Operation the question exercises.
    pub operation: Operation,
    /// Question shown to the player, e.g. `"3 + 5 = ?"`.
    pub question_text: String,
    /// The right answer, as displayed.
    pub correct_answer: String,
    /// Answer options; must contain `correct_answer`.
    pub options: Vec<String>,
}

/// One correct term/match pairing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    /// Provider-assigned pair identifier.
    #[serde(default)]
    pub id: String,
    /// Left-hand side, e.g. `"Apple"`.
    pub term: String,
    /// Right-hand side, e.g. `"Red"`.
    #[serde(rename = "match")]
    pub match_value: String,
}

impl WordPair {
    /// Build a pair.
    pub fn new(id: impl Into<String>, term: impl Into<String>, match_value: impl Into<String>) -> Self {
        Self { id: id.into(), term: term.into(), match_value: match_value.into() }
    }
}

/// Raw vocabulary puzzle as produced by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyContent {
    /// Instruction shown above the puzzle.
    pub prompt_text: String,
    /// Correct pairs, in display order of their terms.
    pub pairs: Vec<WordPair>,
}

/// Provider answer to a [`ContentRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentResponse {
    /// Multiple-choice question.
    Arithmetic(ArithmeticContent),
    /// Matching puzzle.
    Vocabulary(VocabularyContent),
}

impl ContentResponse {
    /// Mode this content belongs to.
    pub fn mode(&self) -> GameMode {
        match self {
            Self::Arithmetic(_) => GameMode::Arithmetic,
            Self::Vocabulary(_) => GameMode::Vocabulary,
        }
    }
}

/// A validated multiple-choice arithmetic question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArithmeticQuestion {
    id: PuzzleId,
    operation: Operation,
    question_text: String,
    correct_answer: String,
    options: [String; OPTION_COUNT],
}

impl ArithmeticQuestion {
    /// Validate raw content into a question.
    ///
    /// Text is trimmed. The question and answer must be non-empty, and there
    /// must be exactly four distinct options, one equal to the answer.
    pub fn new(id: PuzzleId, content: ArithmeticContent) -> Result<Self, ContentError> {
        let question_text = non_empty(content.question_text, "questionText")?;
        let correct_answer = non_empty(content.correct_answer, "correctAnswer")?;

        let found = content.options.len();
        let options = content
            .options
            .into_iter()
            .map(|option| non_empty(option, "option"))
            .collect::<Result<Vec<_>, _>>()?;
        let options: [String; OPTION_COUNT] =
            options.try_into().map_err(|_| ContentError::OptionCount { found })?;

        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.as_str()) {
                return Err(ContentError::DuplicateOption { option: option.clone() });
            }
        }
        if !seen.contains(correct_answer.as_str()) {
            return Err(ContentError::MissingCorrectOption { answer: correct_answer });
        }

        Ok(Self { id, operation: content.operation, question_text, correct_answer, options })
    }

    /// Whether `choice` is the right answer (exact string equality).
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }

    /// Puzzle identifier.
    pub fn id(&self) -> PuzzleId {
        self.id
    }

    /// Operation exercised.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Question text.
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    /// Right answer.
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// The four options, in display order.
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }
}

/// A validated term/match puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyPuzzle {
    id: PuzzleId,
    prompt_text: String,
    pairs: Vec<WordPair>,
    terms: Vec<String>,
    matches: Vec<String>,
}

impl VocabularyPuzzle {
    /// Validate raw content into a puzzle, shuffling the match column.
    ///
    /// Terms and match values must be non-empty and unique, so a match value
    /// identifies at most one pair.
    pub fn new<R: Rng + ?Sized>(
        id: PuzzleId,
        content: VocabularyContent,
        rng: &mut R,
    ) -> Result<Self, ContentError> {
        let prompt_text = non_empty(content.prompt_text, "promptText")?;
        if content.pairs.is_empty() {
            return Err(ContentError::NoPairs);
        }

        let mut pairs = Vec::with_capacity(content.pairs.len());
        let mut terms_seen = HashSet::new();
        let mut matches_seen = HashSet::new();
        for pair in content.pairs {
            let term = non_empty(pair.term, "term")?;
            let match_value = non_empty(pair.match_value, "match")?;
            if !terms_seen.insert(term.clone()) {
                return Err(ContentError::DuplicateTerm { term });
            }
            if !matches_seen.insert(match_value.clone()) {
                return Err(ContentError::DuplicateMatch { value: match_value });
            }
            pairs.push(WordPair { id: pair.id, term, match_value });
        }

        let terms = pairs.iter().map(|p| p.term.clone()).collect();
        let mut matches: Vec<String> = pairs.iter().map(|p| p.match_value.clone()).collect();
        matches.shuffle(rng);

        Ok(Self { id, prompt_text, pairs, terms, matches })
    }

    /// Correct match for `term`, if `term` belongs to this puzzle.
    pub fn match_for(&self, term: &str) -> Option<&str> {
        self.pairs.iter().find(|p| p.term == term).map(|p| p.match_value.as_str())
    }

    /// Whether `term` is one of this puzzle's terms.
    pub fn has_term(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    /// Puzzle identifier.
    pub fn id(&self) -> PuzzleId {
        self.id
    }

    /// Instruction text.
    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    /// Correct pairs in term order.
    pub fn pairs(&self) -> &[WordPair] {
        &self.pairs
    }

    /// Terms for display, in pair order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Match values for display, shuffled.
    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    /// Number of pairs to match.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }
}

/// A validated puzzle of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Puzzle {
    /// Multiple-choice question.
    Arithmetic(ArithmeticQuestion),
    /// Matching puzzle.
    Vocabulary(VocabularyPuzzle),
}

impl Puzzle {
    /// Validate a provider response into a puzzle.
    pub fn assemble<R: Rng + ?Sized>(
        id: PuzzleId,
        response: ContentResponse,
        rng: &mut R,
    ) -> Result<Self, ContentError> {
        match response {
            ContentResponse::Arithmetic(content) => {
                ArithmeticQuestion::new(id, content).map(Self::Arithmetic)
            },
            ContentResponse::Vocabulary(content) => {
                VocabularyPuzzle::new(id, content, rng).map(Self::Vocabulary)
            },
        }
    }

    /// Mode this puzzle belongs to.
    pub fn mode(&self) -> GameMode {
        match self {
            Self::Arithmetic(_) => GameMode::Arithmetic,
            Self::Vocabulary(_) => GameMode::Vocabulary,
        }
    }

    /// Puzzle identifier.
    pub fn id(&self) -> PuzzleId {
        match self {
            Self::Arithmetic(q) => q.id(),
            Self::Vocabulary(p) => p.id(),
        }
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, ContentError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContentError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}
