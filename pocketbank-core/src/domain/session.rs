//! Authentication session state

use serde::{Deserialize, Serialize};

use super::user::Credentials;

/// Authentication status and the current user.
///
/// `is_authenticated` implies `user.is_some()`. The only ways to move between
/// values are the constructors below, so the invariant holds for every
/// session the store publishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub user: Option<Credentials>,
}

impl Default for Session {
    fn default() -> Self {
        Self::logged_out()
    }
}

impl Session {
    pub fn logged_out() -> Self {
        Self {
            is_authenticated: false,
            is_loading: false,
            user: None,
        }
    }

    pub fn logged_in(user: Credentials) -> Self {
        Self {
            is_authenticated: true,
            is_loading: false,
            user: Some(user),
        }
    }

    /// Same session with the loading flag replaced
    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    /// Email of the signed-in user, if any
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_loading {
            SessionPhase::Authenticating
        } else if self.is_authenticated {
            SessionPhase::LoggedIn
        } else {
            SessionPhase::LoggedOut
        }
    }
}

/// Coarse state of the sign-in state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    LoggedOut,
    Authenticating,
    LoggedIn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        assert_eq!(Session::logged_out().phase(), SessionPhase::LoggedOut);
        assert_eq!(Session::logged_out().loading(true).phase(), SessionPhase::Authenticating);

        let session = Session::logged_in(Credentials::new("a@b.co", "secret1"));
        assert_eq!(session.phase(), SessionPhase::LoggedIn);
        assert_eq!(session.email(), Some("a@b.co"));
    }

    #[test]
    fn test_default_is_logged_out() {
        let session = Session::default();
        assert!(!session.is_authenticated);
        assert!(!session.is_loading);
        assert!(session.user.is_none());
    }
}
