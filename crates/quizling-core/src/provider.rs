//! Content provider contract.
//!
//! A provider is a stateless request/response source of puzzle content. The
//! session never calls it directly: the runtime awaits the provider, assembles
//! the response into a [`crate::Puzzle`], and feeds the outcome back to the
//! session as an event.

use std::future::Future;

use crate::{ContentRequest, ContentResponse};

/// Source of puzzle content for a (mode, level) request.
///
/// # Implementations
///
/// - **Remote**: asks a generative language model over HTTP
/// - **Offline**: generates content locally from built-in tables
/// - **Scripted**: replays canned responses in simulation tests
pub trait ContentProvider: Send + Sync {
    /// Provider-specific failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch content for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, missing credentials, or a
    /// response that does not parse. Callers treat every error the same way.
    fn fetch(
        &self,
        request: ContentRequest,
    ) -> impl Future<Output = Result<ContentResponse, Self::Error>> + Send;
}
