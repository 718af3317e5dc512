//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`quizling_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Input is a script of intents separated by pauses ("think time"). Pauses
//! are awaited on tokio's clock, so with a paused clock the runtime's timers
//! and provider latency interleave with player input deterministically.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use quizling_app::{Driver, Session, SessionEvent, SessionView};
use tokio::time::Instant;

use crate::invariants::{InvariantRegistry, SessionSnapshot};

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// One step of scripted player input.
#[derive(Debug, Clone)]
pub enum Step {
    /// Deliver an intent.
    Intent(SessionEvent),
    /// Let time pass before the next step.
    Pause(Duration),
}

/// Shared state, readable after the driver moved into a runtime.
#[derive(Default)]
struct SharedState {
    script: VecDeque<Step>,
    resume_at: Option<Instant>,
    renders: Vec<SessionView>,
}

/// Simulation driver for deterministic testing.
///
/// Clones share the script and the render log.
#[derive(Clone, Default)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl SimDriver {
    /// Create a driver with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a driver that plays `steps`.
    pub fn scripted(steps: impl IntoIterator<Item = Step>) -> Self {
        let driver = Self::new();
        driver.lock().script.extend(steps);
        driver
    }

    /// Check invariants on every render; a violation fails the run.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    /// Queue an intent.
    pub fn push_intent(&self, event: SessionEvent) {
        self.lock().script.push_back(Step::Intent(event));
    }

    /// Queue a pause.
    pub fn push_pause(&self, duration: Duration) {
        self.lock().script.push_back(Step::Pause(duration));
    }

    /// Every view rendered so far.
    pub fn renders(&self) -> Vec<SessionView> {
        self.lock().renders.clone()
    }

    /// The most recent rendered view.
    pub fn last_render(&self) -> Option<SessionView> {
        self.lock().renders.last().cloned()
    }

    /// Check if script steps remain.
    pub fn has_pending(&self) -> bool {
        !self.lock().script.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self, _session: &Session) -> Result<Option<SessionEvent>, Self::Error> {
        loop {
            // A pending deadline survives cancellation, so a dropped poll
            // resumes the same pause instead of skipping it.
            let resume_at = {
                let mut state = self.lock();
                if state.resume_at.is_none() {
                    match state.script.pop_front() {
                        None => return Ok(None),
                        Some(Step::Intent(event)) => return Ok(Some(event)),
                        Some(Step::Pause(duration)) => state.resume_at = Some(Instant::now() + duration),
                    }
                }
                state.resume_at
            };

            if let Some(deadline) = resume_at {
                tokio::time::sleep_until(deadline).await;
                self.lock().resume_at = None;
            }
        }
    }

    fn render(&mut self, session: &Session) -> Result<(), Self::Error> {
        let view = session.view();
        let mut state = self.lock();

        if let Some(registry) = &self.invariants {
            let snapshot = SessionSnapshot {
                before: state.renders.last().cloned(),
                after: view.clone(),
                config: *session.config(),
            };
            if let Err(violations) = registry.check_all(&snapshot) {
                let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
                return Err(SimDriverError(messages.join("; ")));
            }
        }

        state.renders.push(view);
        Ok(())
    }

    fn stop(&mut self) {
        tracing::debug!(renders = self.lock().renders.len(), "simulation stopped");
    }
}
