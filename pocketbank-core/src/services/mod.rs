//! Service layer - application state and screen logic
//!
//! Services hold the mutable state of the app (session, queries, form) and
//! coordinate domain derivations with the ports.

pub mod account_data;
pub mod auth;
pub mod home;
pub mod logging;
pub mod login;
pub mod router;

pub use account_data::{AccountDataStore, QueryState};
pub use auth::AuthSession;
pub use home::{AccountAction, HomeScreen, HomeSnapshot};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use login::{LoginForm, SubmitOutcome, REJECTED_MESSAGE};
pub use router::Route;
