//! Application layer for Quizling
//!
//! Pure session state machine and generic runtime, enabling deterministic
//! simulation testing with the same code that runs in production.
//!
//! # Components
//!
//! - [`Session`]: session controller (lifecycle, answer evaluation, matching)
//! - [`Driver`]: Trait for platform-specific input and rendering
//! - [`Runtime`]: Generic orchestration loop executing [`SessionAction`]s

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod driver;
mod event;
mod runtime;
mod session;
mod state;

pub use action::{FetchTicket, SessionAction, TimerId};
pub use driver::Driver;
pub use event::SessionEvent;
pub use runtime::{Runtime, fetch_puzzle};
pub use session::{RETRY_MESSAGE, Session};
pub use state::{ArithmeticState, Interaction, SessionView, VocabularyState};
