//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the session runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific input and rendering, while the generic
//! [`crate::Runtime`] handles content fetches, timers, and orchestration.

use std::future::Future;

use crate::{Session, SessionEvent};

/// Abstracts player-facing I/O for the session runtime.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events and ratatui for drawing
/// - **Simulation**: Replays scripted intents and records renders
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next player intent.
    ///
    /// The session is passed so frontends can resolve positional input
    /// ("option 2") into the text the session expects. Returns `None` once
    /// input is exhausted and the runtime should stop.
    ///
    /// Must be cancel-safe: the runtime drops this future whenever a fetch
    /// or timer completes first.
    ///
    /// # Errors
    ///
    /// Returns an error if the input source fails.
    fn poll_event(
        &mut self,
        session: &Session,
    ) -> impl Future<Output = Result<Option<SessionEvent>, Self::Error>> + Send;

    /// Render the session.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, session: &Session) -> Result<(), Self::Error>;

    /// Release input and output resources.
    fn stop(&mut self);
}
