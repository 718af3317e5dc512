//! Generic runtime for session orchestration.
//!
//! The Runtime drives the session event loop, coordinating between:
//! - [`Session`]: game state machine
//! - [`ContentProvider`]: puzzle source, awaited on spawned tasks
//! - [`Driver`]: platform-specific I/O
//!
//! Fetches and dismissal timers run as tokio tasks that report back through
//! an internal channel. A new fetch aborts the one it supersedes; the session
//! additionally discards any completion whose generation is no longer
//! current, so an abort that loses the race is harmless.

use std::{collections::HashMap, sync::Arc, time::Duration};

use quizling_core::{ContentError, ContentProvider, Environment, Puzzle, PuzzleId};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{Driver, FetchTicket, Session, SessionAction, SessionEvent, TimerId};

/// Generic runtime that orchestrates Session, provider, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `P`: Content provider
/// - `E`: Environment for timers and puzzle shuffling
pub struct Runtime<D, P, E>
where
    D: Driver,
    P: ContentProvider + 'static,
    E: Environment,
{
    driver: D,
    session: Session,
    provider: Arc<P>,
    env: E,
    completions_tx: mpsc::UnboundedSender<SessionEvent>,
    completions_rx: mpsc::UnboundedReceiver<SessionEvent>,
    fetch_task: Option<JoinHandle<()>>,
    timers: HashMap<TimerId, JoinHandle<()>>,
}

impl<D, P, E> Runtime<D, P, E>
where
    D: Driver,
    P: ContentProvider + 'static,
    E: Environment,
{
    /// Create a new runtime around an existing session.
    pub fn new(driver: D, session: Session, provider: P, env: E) -> Self {
        Self::with_shared_provider(driver, session, Arc::new(provider), env)
    }

    /// Create a runtime whose provider is shared with the caller.
    pub fn with_shared_provider(driver: D, session: Session, provider: Arc<P>, env: E) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            driver,
            session,
            provider,
            env,
            completions_tx,
            completions_rx,
            fetch_task: None,
            timers: HashMap::new(),
        }
    }

    /// Run the main event loop until the player quits or input closes.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error. Provider
    /// failures are never errors here; they reach the session as events.
    pub async fn run(mut self) -> Result<Session, D::Error> {
        let result = self.run_loop().await;
        self.shutdown();
        result.map(|()| self.session)
    }

    async fn run_loop(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.session)?;

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                return Ok(());
            }
        }
    }

    /// Process one cycle of the event loop.
    ///
    /// Completions take priority over player input so a reply that is
    /// already waiting is applied before the next intent.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let event = tokio::select! {
            biased;
            Some(event) = self.completions_rx.recv() => event,
            polled = self.driver.poll_event(&self.session) => match polled? {
                Some(event) => event,
                None => {
                    tracing::debug!("input closed");
                    return Ok(true);
                },
            },
        };

        self.dispatch(event)
    }

    /// Feed one event to the session and execute the resulting actions.
    ///
    /// Returns `true` if should quit.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<bool, D::Error> {
        if let SessionEvent::DismissElapsed { timer } = &event {
            self.timers.remove(timer);
        }

        let actions = self.session.handle(event);
        let mut should_quit = false;
        for action in actions {
            should_quit |= self.execute(action)?;
        }
        Ok(should_quit)
    }

    fn execute(&mut self, action: SessionAction) -> Result<bool, D::Error> {
        match action {
            SessionAction::Render => self.driver.render(&self.session)?,
            SessionAction::FetchContent(ticket) => self.spawn_fetch(ticket),
            SessionAction::ScheduleDismiss { timer, after } => self.spawn_timer(timer, after),
            SessionAction::CancelDismiss { timer } => {
                if let Some(handle) = self.timers.remove(&timer) {
                    handle.abort();
                }
            },
            SessionAction::SessionFinished { final_score } => {
                tracing::info!(final_score, "session finished");
            },
            SessionAction::Quit => return Ok(true),
        }
        Ok(false)
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        if let Some(previous) = self.fetch_task.take() {
            previous.abort();
        }

        let provider = Arc::clone(&self.provider);
        let env = self.env.clone();
        let completions = self.completions_tx.clone();
        self.fetch_task = Some(tokio::spawn(async move {
            let event = fetch_puzzle(provider.as_ref(), &env, ticket).await;
            // Receiver gone means the runtime is shutting down
            let _ = completions.send(event);
        }));
    }

    fn spawn_timer(&mut self, timer: TimerId, after: Duration) {
        let env = self.env.clone();
        let completions = self.completions_tx.clone();
        let handle = tokio::spawn(async move {
            env.sleep(after).await;
            let _ = completions.send(SessionEvent::DismissElapsed { timer });
        });

        if let Some(previous) = self.timers.insert(timer, handle) {
            previous.abort();
        }
    }

    fn shutdown(&mut self) {
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
        self.driver.stop();
    }

    /// The session being driven.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Dismissal timers currently armed.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }
}

/// Fetch content for `ticket` and assemble it into a puzzle event.
///
/// Every failure (provider error, wrong mode, malformed content) becomes
/// [`SessionEvent::ContentFailed`] carrying a diagnostic reason.
pub async fn fetch_puzzle<P, E>(provider: &P, env: &E, ticket: FetchTicket) -> SessionEvent
where
    P: ContentProvider,
    E: Environment,
{
    let FetchTicket { generation, request } = ticket;

    let response = match provider.fetch(request).await {
        Ok(response) => response,
        Err(error) => {
            return SessionEvent::ContentFailed { generation, reason: error.to_string() };
        },
    };

    if response.mode() != request.mode {
        let error = ContentError::ModeMismatch { expected: request.mode, received: response.mode() };
        return SessionEvent::ContentFailed { generation, reason: error.to_string() };
    }

    match Puzzle::assemble(PuzzleId(generation), response, &mut env.rng()) {
        Ok(puzzle) => SessionEvent::ContentLoaded { generation, puzzle },
        Err(error) => SessionEvent::ContentFailed { generation, reason: error.to_string() },
    }
}
