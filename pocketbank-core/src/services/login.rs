//! Login form state and submission

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::{Error, Field, Result};
use crate::domain::{
    is_valid_email, is_valid_password, Credentials, INVALID_EMAIL_MESSAGE, SHORT_PASSWORD_MESSAGE,
};
use crate::services::auth::AuthSession;
use crate::services::logging::{events, log_quietly, LogEvent, LoggingService};

/// Shown on both fields when the session rejects the credentials. The form
/// never says which of the two was wrong.
pub const REJECTED_MESSAGE: &str = "Invalid email or password";

/// What a submit attempt ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    SignedIn,
    /// Local validation failed; the session was not called
    Invalid,
    /// Another sign-in is in flight; the session was not called
    Busy,
    /// The session rejected the credentials
    Rejected,
}

/// State of the login screen's form
#[derive(Clone, Default, Serialize)]
pub struct LoginForm {
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    pub show_password: bool,
    pub focused: Option<Field>,
    #[serde(skip)]
    logger: Option<Arc<LoggingService>>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Editing a field clears that field's error
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.email_error = None;
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.password_error = None;
        if self.password.is_empty() {
            self.show_password = false;
        }
    }

    pub fn focus(&mut self, field: Option<Field>) {
        self.focused = field;
    }

    /// Submitting the email field moves focus to the password
    pub fn next_field(&mut self) {
        self.focused = match self.focused {
            Some(Field::Email) => Some(Field::Password),
            other => other,
        };
    }

    /// The visibility toggle only exists while a password is typed
    pub fn can_toggle_password(&self) -> bool {
        !self.password.is_empty()
    }

    pub fn toggle_password_visibility(&mut self) {
        if self.can_toggle_password() {
            self.show_password = !self.show_password;
        }
    }

    /// Password as it should be rendered
    pub fn password_display(&self) -> String {
        if self.show_password {
            self.password.clone()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }

    pub fn is_valid(&self) -> bool {
        is_valid_email(&self.email) && is_valid_password(&self.password)
    }

    /// Whether the sign-in button is enabled
    pub fn can_submit(&self, is_loading: bool) -> bool {
        !is_loading && self.is_valid()
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        match field {
            Field::Email => self.email_error.as_deref(),
            Field::Password => self.password_error.as_deref(),
        }
    }

    /// Set both field errors from local validation. Returns true if both pass.
    pub fn validate(&mut self) -> bool {
        self.email_error = (!is_valid_email(&self.email)).then(|| INVALID_EMAIL_MESSAGE.to_string());
        self.password_error =
            (!is_valid_password(&self.password)).then(|| SHORT_PASSWORD_MESSAGE.to_string());
        self.email_error.is_none() && self.password_error.is_none()
    }

    /// Credentials as they are sent to the session (email trimmed)
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.as_str(), self.password.as_str()).normalized()
    }

    /// Validate, then sign in through `auth`.
    ///
    /// Validation failures set the field errors and return
    /// [`SubmitOutcome::Invalid`] without touching the session. While the
    /// session is already authenticating the form is not submitted at all.
    /// A rejected sign-in sets the same generic message on both fields.
    pub async fn submit(&mut self, auth: &AuthSession) -> Result<SubmitOutcome> {
        if !self.validate() {
            log_quietly(
                self.logger.as_ref(),
                LogEvent::new(events::LOGIN_VALIDATION_FAILED).with_screen("login"),
            );
            return Ok(SubmitOutcome::Invalid);
        }
        if !self.can_submit(auth.is_loading()) {
            return Ok(SubmitOutcome::Busy);
        }

        match auth.sign_in(Some(self.credentials())).await {
            Ok(()) => Ok(SubmitOutcome::SignedIn),
            Err(Error::Authentication(_)) => {
                self.email_error = Some(REJECTED_MESSAGE.to_string());
                self.password_error = Some(REJECTED_MESSAGE.to_string());
                Ok(SubmitOutcome::Rejected)
            }
            Err(e) => Err(e),
        }
    }
}
