//! Auth service - the authentication session store
//!
//! One `AuthSession` is created per application context and shared by the
//! login form, the header's sign-out button and the router. State is
//! published whole through a `watch` channel, so observers never see a
//! half-applied update.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;

use crate::domain::result::{Error, Result};
use crate::domain::{Credentials, Session, SessionPhase};
use crate::services::logging::{events, log_quietly, LogEvent, LoggingService};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Outcome of one sign-in attempt, shared with every caller that joined it
#[derive(Debug, Clone, PartialEq, Eq)]
enum Attempt {
    Pending,
    Succeeded,
    Failed(String),
}

type AttemptReceiver = watch::Receiver<Attempt>;

enum Role {
    Leader(watch::Sender<Attempt>),
    Follower(AttemptReceiver),
}

pub struct AuthSession {
    state: watch::Sender<Session>,
    in_flight: Mutex<Option<AttemptReceiver>>,
    latency: Duration,
    reject_all: bool,
    logger: Option<Arc<LoggingService>>,
}

impl AuthSession {
    /// New logged-out session with the given simulated sign-in latency
    pub fn new(latency: Duration) -> Self {
        let (state, _) = watch::channel(Session::logged_out());
        Self {
            state,
            in_flight: Mutex::new(None),
            latency,
            reject_all: false,
            logger: None,
        }
    }

    /// Make every attempt fail as if the credentials were wrong
    pub fn failing(mut self, fail: bool) -> Self {
        self.reject_all = fail;
        self
    }

    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Current session
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Observe every session replacement
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Sign in after the simulated network delay.
    ///
    /// Absent credentials (`None`, blank email or empty password) fail with
    /// an authentication error and leave `is_authenticated` untouched, as
    /// does every attempt on a [`failing`](Self::failing) session.
    /// A call made while another sign-in is in flight does not start a
    /// second attempt: it waits for the running one and returns its outcome.
    pub async fn sign_in(&self, credentials: Option<Credentials>) -> Result<()> {
        let role = {
            let mut slot = self
                .in_flight
                .lock()
                .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))?;
            match slot.as_ref() {
                Some(rx) => Role::Follower(rx.clone()),
                None => {
                    let (tx, rx) = watch::channel(Attempt::Pending);
                    *slot = Some(rx);
                    Role::Leader(tx)
                }
            }
        };

        let tx = match role {
            Role::Leader(tx) => tx,
            Role::Follower(rx) => {
                log_quietly(
                    self.logger.as_ref(),
                    LogEvent::new(events::SIGN_IN_JOINED).with_screen("login"),
                );
                return Self::join(rx).await;
            }
        };

        let mut guard = InFlightGuard {
            session: self,
            tx: Some(tx),
        };

        self.state.send_modify(|s| s.is_loading = true);
        log_quietly(self.logger.as_ref(), LogEvent::new(events::SIGN_IN_STARTED).with_screen("login"));

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let accepted = credentials.filter(|c| c.is_present() && !self.reject_all);
        let outcome = match accepted {
            Some(user) => {
                self.state.send_replace(Session::logged_in(user));
                log_quietly(self.logger.as_ref(), LogEvent::new(events::SIGN_IN_SUCCEEDED).with_screen("login"));
                Attempt::Succeeded
            }
            None => {
                self.state.send_modify(|s| s.is_loading = false);
                log_quietly(
                    self.logger.as_ref(),
                    LogEvent::new(events::SIGN_IN_FAILED)
                        .with_screen("login")
                        .with_error(INVALID_CREDENTIALS),
                );
                Attempt::Failed(INVALID_CREDENTIALS.to_string())
            }
        };

        guard.finish(outcome.clone());
        Self::into_result(outcome)
    }

    /// Reset to logged out. Does not touch the loading flag.
    pub fn sign_out(&self) {
        self.state.send_modify(|s| {
            s.is_authenticated = false;
            s.user = None;
        });
        log_quietly(self.logger.as_ref(), LogEvent::new(events::SIGNED_OUT));
    }

    async fn join(mut rx: AttemptReceiver) -> Result<()> {
        let outcome = match rx.wait_for(|a| *a != Attempt::Pending).await {
            Ok(outcome) => outcome.clone(),
            // The leading call was dropped before it finished
            Err(_) => Attempt::Failed("sign-in was cancelled".to_string()),
        };
        Self::into_result(outcome)
    }

    fn into_result(outcome: Attempt) -> Result<()> {
        match outcome {
            Attempt::Succeeded => Ok(()),
            Attempt::Failed(msg) => Err(Error::authentication(msg)),
            Attempt::Pending => Err(Error::authentication("sign-in did not complete")),
        }
    }

    fn release_in_flight(&self) {
        if let Ok(mut slot) = self.in_flight.lock() {
            *slot = None;
        }
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_SIGN_IN_LATENCY_MS))
    }
}

/// Releases the in-flight slot when the leading sign-in ends, including when
/// its future is dropped mid-flight.
struct InFlightGuard<'a> {
    session: &'a AuthSession,
    tx: Option<watch::Sender<Attempt>>,
}

impl InFlightGuard<'_> {
    fn finish(&mut self, outcome: Attempt) {
        self.session.release_in_flight();
        if let Some(tx) = self.tx.take() {
            tx.send_replace(outcome);
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.tx.is_some() {
            self.session.state.send_modify(|s| s.is_loading = false);
            log_quietly(self.session.logger.as_ref(), LogEvent::new(events::SIGN_IN_CANCELLED));
            self.finish(Attempt::Failed("sign-in was cancelled".to_string()));
        }
    }
}
