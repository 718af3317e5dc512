//! Choosing a content provider at startup.

use quizling_core::{ContentProvider, ContentRequest, ContentResponse, Environment};

use crate::{OfflineProvider, ProviderError, RemoteConfig, RemoteProvider};

/// Either provider, chosen once at startup.
#[derive(Debug, Clone)]
pub enum AnyProvider<E> {
    /// Generative service.
    Remote(RemoteProvider<E>),
    /// Local generator.
    Offline(OfflineProvider<E>),
}

impl<E: Environment> AnyProvider<E> {
    /// Whether content comes from the generative service.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl<E: Environment> ContentProvider for AnyProvider<E> {
    type Error = ProviderError;

    async fn fetch(&self, request: ContentRequest) -> Result<ContentResponse, Self::Error> {
        match self {
            Self::Remote(remote) => remote.fetch(request).await,
            Self::Offline(offline) => Ok(offline.generate(request)),
        }
    }
}

/// Use the generative service when configured, local content otherwise.
pub fn select_provider<E: Environment>(config: Option<RemoteConfig>, env: E) -> AnyProvider<E> {
    match config {
        Some(config) => {
            tracing::info!(model = %config.model, "using generative content");
            AnyProvider::Remote(RemoteProvider::new(config, env))
        },
        None => {
            tracing::warn!("no API key configured, using offline content");
            AnyProvider::Offline(OfflineProvider::new(env))
        },
    }
}
