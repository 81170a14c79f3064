//! Routing shell: which screen the session allows

use serde::{Deserialize, Serialize};

use crate::domain::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Login,
    Home,
}

/// Where to send the user from `current`, if anywhere.
///
/// Nothing moves while a sign-in is in flight; the login screen stays up
/// with its spinner until the outcome is known.
pub fn redirect(session: &Session, current: Route) -> Option<Route> {
    if session.is_loading {
        return None;
    }
    match (session.is_authenticated, current) {
        (false, Route::Home) => Some(Route::Login),
        (true, Route::Login) => Some(Route::Home),
        _ => None,
    }
}

/// Screen to show for a session, starting from `current`
pub fn resolve(session: &Session, current: Route) -> Route {
    redirect(session, current).unwrap_or(current)
}
