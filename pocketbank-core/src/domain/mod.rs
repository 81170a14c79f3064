//! Core domain entities
//!
//! All entities and pure derivations live here. No I/O or async code.

mod account;
pub mod interpolation;
pub mod presentation;
pub mod result;
mod scroll;
mod session;
mod transaction;
mod user;

pub use account::{CardInfo, BALANCE_DISPLAY_SCALE};
pub use interpolation::Interpolation;
pub use presentation::{
    ActionRowVisualState, BoxStyle, CardPresentation, CardStatus, CardVisualState,
    CreditCardVisualState,
};
pub use scroll::ScrollProgress;
pub use session::{Session, SessionPhase};
pub use transaction::{sort_newest_first, Transaction, TransactionFeed};
pub use user::{
    is_valid_email, is_valid_password, Credentials, INVALID_EMAIL_MESSAGE, MIN_PASSWORD_LEN,
    SHORT_PASSWORD_MESSAGE,
};
