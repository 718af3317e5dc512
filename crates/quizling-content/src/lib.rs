//! Content sources for Quizling
//!
//! Implementations of [`quizling_core::ContentProvider`] plus the production
//! [`quizling_core::Environment`].
//!
//! # Components
//!
//! - [`RemoteProvider`]: generative language model over HTTP/JSON
//! - [`OfflineProvider`]: local generator used when no API key is configured
//! - [`select_provider`]: picks one at startup
//! - [`SystemEnv`]: wall-clock time, OS-seeded randomness

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod offline;
pub mod remote;
mod select;
mod system_env;

pub use error::{EntropyError, ProviderError};
pub use offline::OfflineProvider;
pub use remote::{RemoteConfig, RemoteProvider};
pub use select::{AnyProvider, select_provider};
pub use system_env::SystemEnv;
