//! Error types for content providers.

use thiserror::Error;

/// Errors emitted while fetching content from a provider.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// No API key is configured.
    #[error("content service is not configured")]
    Disabled,

    /// The service answered with a non-success status.
    #[error("content request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Transport failure or undecodable response envelope.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The service answered without any text.
    #[error("content service returned an empty response")]
    EmptyResponse,

    /// The returned text is not the requested JSON object.
    #[error("content is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// OS entropy could not seed the production environment.
#[derive(Debug, Error)]
#[error("OS entropy unavailable: {0}")]
pub struct EntropyError(pub(crate) getrandom::Error);
