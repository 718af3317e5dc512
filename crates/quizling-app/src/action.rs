//! Session side-effects.
//!
//! This module defines the [`SessionAction`] enum, which represents
//! instructions produced by the [`crate::Session`] state machine for the
//! runtime to execute.

use std::time::Duration;

use quizling_core::ContentRequest;

/// Identifier of a scheduled feedback dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// A content request tagged with the fetch generation it was issued under.
///
/// Only a completion carrying the session's current generation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonic fetch sequence number.
    pub generation: u64,
    /// What to fetch.
    pub request: ContentRequest,
}

/// Actions produced by the Session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Render the session.
    Render,

    /// Fetch new content. Supersedes any fetch still in flight.
    FetchContent(FetchTicket),

    /// Deliver [`crate::SessionEvent::DismissElapsed`] after a delay.
    ScheduleDismiss {
        /// Timer to report when the delay elapses.
        timer: TimerId,
        /// Delay before dismissal.
        after: Duration,
    },

    /// Drop a scheduled dismissal.
    CancelDismiss {
        /// Timer to cancel.
        timer: TimerId,
    },

    /// The final level was completed and acknowledged.
    SessionFinished {
        /// Stars collected over the session.
        final_score: u32,
    },

    /// Quit the application.
    Quit,
}
