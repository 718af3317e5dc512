//! Generative content service.
//!
//! Asks a Gemini-compatible `generateContent` endpoint for one JSON object per
//! request. The operation or theme is picked locally from the curriculum and
//! spelled out in the prompt, so the model only writes the puzzle text.

use std::env;

use quizling_core::{
    ArithmeticContent, ContentProvider, ContentRequest, ContentResponse, Environment, GameMode,
    Operation, Theme, VocabularyContent, curriculum,
};
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ProviderError;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Connection settings for the generative service.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    /// API root, without the `/models/...` suffix.
    pub base_url: String,
    /// API key sent as `x-goog-api-key`.
    pub api_key: String,
    /// Model name.
    pub model: String,
}

impl RemoteConfig {
    /// Read `QUIZLING_API_KEY` (or `GEMINI_API_KEY`), `QUIZLING_API_BASE_URL`
    /// and `QUIZLING_MODEL`.
    ///
    /// Returns `None` when no non-blank API key is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let api_key = ["QUIZLING_API_KEY", "GEMINI_API_KEY"]
            .into_iter()
            .filter_map(&lookup)
            .find(|key| !key.trim().is_empty())?;
        let base_url = lookup("QUIZLING_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = lookup("QUIZLING_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into());
        Some(Self { base_url, api_key: api_key.trim().to_owned(), model })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), self.model)
    }
}

/// What a single request asks the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// An arithmetic question for this operation.
    Operation(Operation),
    /// A vocabulary puzzle on this theme.
    Theme(Theme),
}

impl Topic {
    /// Pick a curriculum topic for `request`.
    pub fn pick<E: Environment>(request: ContentRequest, env: &E) -> Self {
        let mut rng = env.rng();
        match request.mode {
            GameMode::Arithmetic => Self::Operation(
                curriculum::operations_for_level(request.level)
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(Operation::Addition),
            ),
            GameMode::Vocabulary => Self::Theme(
                curriculum::themes_for_level(request.level)
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(Theme::ObjectColors),
            ),
        }
    }
}

/// Content provider backed by the generative service.
#[derive(Clone, Debug)]
pub struct RemoteProvider<E> {
    client: Client,
    config: RemoteConfig,
    env: E,
}

impl<E: Environment> RemoteProvider<E> {
    /// Create a provider. `env` picks topics.
    #[must_use]
    pub fn new(config: RemoteConfig, env: E) -> Self {
        Self { client: Client::new(), config, env }
    }

    /// Model in use.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send `prompt` and return the model's text.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the request fails or the response holds
    /// no text.
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::Disabled);
        }

        let payload = GenerateRequest {
            contents: [RequestContent { parts: [RequestPart { text: prompt }] }],
            generation_config: GenerationConfig { response_mime_type: "application/json" },
        };

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status()));
        }

        response_text(response.json().await?)
    }
}

/// Join the text parts of the first candidate.
fn response_text(body: GenerateResponse) -> Result<String, ProviderError> {
    let text: String = body
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    Ok(text)
}

impl<E: Environment> ContentProvider for RemoteProvider<E> {
    type Error = ProviderError;

    async fn fetch(&self, request: ContentRequest) -> Result<ContentResponse, Self::Error> {
        let topic = Topic::pick(request, &self.env);
        let prompt = prompt(request.level, topic);
        tracing::debug!(?topic, level = request.level, model = %self.config.model, "requesting content");

        let text = self.generate(&prompt).await?;
        parse_content(topic, &text).inspect_err(|error| {
            tracing::warn!(%error, raw = %text, "unparseable content");
        })
    }
}

/// Build the prompt for `topic` at `level`.
pub fn prompt(level: u32, topic: Topic) -> String {
    match topic {
        Topic::Operation(operation) => arithmetic_prompt(level, operation),
        Topic::Theme(theme) => vocabulary_prompt(level, theme),
    }
}

fn arithmetic_prompt(level: u32, operation: Operation) -> String {
    let range = match level {
        2 => "1-20",
        3 => "1-10 for multipliers and 1-5 for multiplicands; dividends up to 50 for division",
        _ => "1-10",
    };
    let (name, example) = match operation {
        Operation::Addition => ("addition", if level == 1 { "3 + 5 = ?" } else { "12 + 7 = ?" }),
        Operation::Subtraction => ("subtraction", if level == 1 { "8 - 3 = ?" } else { "15 - 6 = ?" }),
        Operation::Multiplication => ("multiplication", "3 x 4 = ?"),
        Operation::Division => ("division (whole number result)", "10 / 2 = ?"),
    };
    let age = 5 + level;

    format!(
        "Generate a simple {name} math question for a child (level {level}, roughly age {age}).\n\
         Numbers involved should be in the range {range}. The result must be a whole number.\n\
         Write the question as a string (e.g. \"{example}\"), the correct numerical answer as a \
         string, and three distinct plausible incorrect answers as strings.\n\
         Respond with a single JSON object: {{ \"questionText\": \"string\", \"correctAnswer\": \
         \"string\", \"options\": [\"string\", \"string\", \"string\", \"string\"] }}.\n\
         The four options must be distinct, shuffled, and include the correct answer."
    )
}

fn vocabulary_prompt(level: u32, theme: Theme) -> String {
    let description = theme.description();
    let prompt_text = theme.prompt_text();
    let age = 5 + level;

    format!(
        "Generate a word matching puzzle for a child (level {level}, roughly age {age}) learning \
         English.\n\
         The theme is \"{description}\". Provide three unique pairs, each a term and its match.\n\
         Respond with a single JSON object: {{ \"promptText\": \"{prompt_text}\", \"pairs\": [\
         {{\"id\": \"pair1\", \"term\": \"string\", \"match\": \"string\"}}, \
         {{\"id\": \"pair2\", \"term\": \"string\", \"match\": \"string\"}}, \
         {{\"id\": \"pair3\", \"term\": \"string\", \"match\": \"string\"}}] }}.\n\
         Example: {{ \"promptText\": \"Match the object to its color:\", \"pairs\": [\
         {{\"id\": \"p1\", \"term\": \"Apple\", \"match\": \"Red\"}}, \
         {{\"id\": \"p2\", \"term\": \"Banana\", \"match\": \"Yellow\"}}, \
         {{\"id\": \"p3\", \"term\": \"Sky\", \"match\": \"Blue\"}}] }}"
    )
}

/// Remove a surrounding Markdown code fence (with optional language tag).
///
/// Text without a complete fence is returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```").and_then(|rest| rest.strip_suffix("```")) else {
        return trimmed;
    };

    let body = inner.trim_start_matches(|c: char| c.is_alphanumeric() || c == '_').trim();
    if body.is_empty() { trimmed } else { body }
}

/// Parse model text into content for `topic`.
///
/// # Errors
///
/// Returns [`ProviderError::Malformed`] when the text is not the expected
/// JSON object.
pub fn parse_content(topic: Topic, text: &str) -> Result<ContentResponse, ProviderError> {
    let json = strip_code_fence(text);
    match topic {
        Topic::Operation(operation) => {
            let raw: RawArithmetic = serde_json::from_str(json)?;
            Ok(ContentResponse::Arithmetic(ArithmeticContent {
                operation,
                question_text: raw.question_text,
                correct_answer: raw.correct_answer.into(),
                options: raw.options.into_iter().map(String::from).collect(),
            }))
        },
        Topic::Theme(_) => {
            let content: VocabularyContent = serde_json::from_str(json)?;
            Ok(ContentResponse::Vocabulary(content))
        },
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArithmetic {
    question_text: String,
    correct_answer: Scalar,
    options: Vec<Scalar>,
}

/// Models sometimes emit numbers where strings were asked for.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn config_requires_api_key() {
        assert!(RemoteConfig::from_lookup(lookup(&[])).is_none());
        assert!(RemoteConfig::from_lookup(lookup(&[("QUIZLING_API_KEY", "  ")])).is_none());
    }

    #[test]
    fn config_falls_back_to_gemini_key_and_defaults() {
        let config = RemoteConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "secret")])).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(
            config.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn config_prefers_quizling_variables() {
        let config = RemoteConfig::from_lookup(lookup(&[
            ("QUIZLING_API_KEY", "mine"),
            ("GEMINI_API_KEY", "theirs"),
            ("QUIZLING_API_BASE_URL", "http://localhost:8080/"),
            ("QUIZLING_MODEL", "tiny"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "mine");
        assert_eq!(config.endpoint(), "http://localhost:8080/models/tiny:generateContent");
    }

    #[test]
    fn strips_fences() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```json"), "```json");
    }

    #[test]
    fn parses_arithmetic_with_numeric_answers() {
        let text = "```json\n{\"questionText\": \"3 + 5 = ?\", \"correctAnswer\": 8, \"options\": [6, \"7\", 8, 9]}\n```";
        let response = parse_content(Topic::Operation(Operation::Addition), text).unwrap();

        let ContentResponse::Arithmetic(content) = response else {
            panic!("expected arithmetic content");
        };
        assert_eq!(content.operation, Operation::Addition);
        assert_eq!(content.correct_answer, "8");
        assert_eq!(content.options, ["6", "7", "8", "9"]);
    }

    #[test]
    fn parses_vocabulary_match_key() {
        let text = r#"{"promptText": "Match the object to its color:", "pairs": [
            {"id": "p1", "term": "Apple", "match": "Red"},
            {"term": "Sky", "match": "Blue"}]}"#;
        let response = parse_content(Topic::Theme(Theme::ObjectColors), text).unwrap();

        insta::assert_debug_snapshot!(response, @r#"
        Vocabulary(
            VocabularyContent {
                prompt_text: "Match the object to its color:",
                pairs: [
                    WordPair {
                        id: "p1",
                        term: "Apple",
                        match_value: "Red",
                    },
                    WordPair {
                        id: "",
                        term: "Sky",
                        match_value: "Blue",
                    },
                ],
            },
        )
        "#);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let error = parse_content(Topic::Theme(Theme::AnimalSounds), "Here you go!").unwrap_err();
        assert!(matches!(error, ProviderError::Malformed(_)));
    }

    #[test]
    fn prompts_name_topic_and_age() {
        let arithmetic = prompt(3, Topic::Operation(Operation::Division));
        assert!(arithmetic.contains("division (whole number result)"));
        assert!(arithmetic.contains("roughly age 8"));
        assert!(arithmetic.contains("dividends up to 50"));

        let vocabulary = prompt(2, Topic::Theme(Theme::AnimalSounds));
        assert!(vocabulary.contains("\"animals and their sounds\""));
        assert!(vocabulary.contains("Match the animal to its sound:"));
    }

    #[test]
    fn response_text_joins_parts() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "{\"a\""}, {"text": ": 1}"}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response_text(response).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn response_without_text_is_empty() {
        for body in [
            r#"{}"#,
            r#"{"candidates": [{"finishReason": "SAFETY"}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"text": "  "}, {"inlineData": {}}]}}]}"#,
        ] {
            let response: GenerateResponse = serde_json::from_str(body).unwrap();
            assert!(matches!(response_text(response), Err(ProviderError::EmptyResponse)), "{body}");
        }
    }

    #[test]
    fn request_body_shape() {
        let payload = GenerateRequest {
            contents: [RequestContent { parts: [RequestPart { text: "hi" }] }],
            generation_config: GenerationConfig { response_mime_type: "application/json" },
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"contents":[{"parts":[{"text":"hi"}]}],"generationConfig":{"responseMimeType":"application/json"}}"#
        );
    }
}
