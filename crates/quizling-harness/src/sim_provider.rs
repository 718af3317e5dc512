//! Scripted content provider.
//!
//! `ScriptedProvider` answers requests from a queue of canned outcomes, each
//! with its own latency, and records every request it receives. Latency is
//! awaited on tokio's clock, so paused-time tests can order completions
//! precisely (a slow first fetch overtaken by a fast second one).

use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use quizling_core::{ContentProvider, ContentRequest, ContentResponse};

/// Failure reported by [`ScriptedProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedFailure(pub String);

impl std::fmt::Display for ScriptedFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scripted failure: {}", self.0)
    }
}

impl std::error::Error for ScriptedFailure {}

/// One canned provider outcome.
#[derive(Debug, Clone)]
pub struct Reply {
    outcome: Result<ContentResponse, ScriptedFailure>,
    latency: Duration,
}

impl Reply {
    /// Answer with `response` immediately.
    pub fn content(response: ContentResponse) -> Self {
        Self { outcome: Ok(response), latency: Duration::ZERO }
    }

    /// Fail with `reason` immediately.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self { outcome: Err(ScriptedFailure(reason.into())), latency: Duration::ZERO }
    }

    /// Delay the outcome by `latency`.
    #[must_use]
    pub fn after(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// Provider replaying a fixed script.
///
/// Requests beyond the end of the script fail.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ContentRequest>>,
}

impl ScriptedProvider {
    /// Create a provider answering with `replies` in order.
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self { replies: Mutex::new(replies.into_iter().collect()), requests: Mutex::default() }
    }

    /// Append a reply to the script.
    pub fn push(&self, reply: Reply) {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner).push_back(reply);
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<ContentRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl ContentProvider for ScriptedProvider {
    type Error = ScriptedFailure;

    async fn fetch(&self, request: ContentRequest) -> Result<ContentResponse, Self::Error> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        let reply = self.replies.lock().unwrap_or_else(PoisonError::into_inner).pop_front();

        let Some(Reply { outcome, latency }) = reply else {
            return Err(ScriptedFailure("script exhausted".into()));
        };
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        outcome
    }
}
