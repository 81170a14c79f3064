//! Login credentials and their validation rules

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const SHORT_PASSWORD_MESSAGE: &str = "Password must be at least 6 characters";

/// Email and password as entered on the login screen.
/// Doubles as the signed-in user once the session accepts it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Credentials count as present when both fields carry something
    pub fn is_present(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    /// Copy with the email trimmed, as submitted by the login form
    pub fn normalized(&self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// `local@domain.tld` shape, ignoring surrounding whitespace
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email(" a@b.co "));
        assert!(!is_valid_email("bad"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.io"));
        assert!(!is_valid_email("a@@b.io"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_password_length() {
        assert!(!is_valid_password("12345"));
        assert!(is_valid_password("123456"));
        // Counted in characters, not bytes
        assert!(!is_valid_password("ééééé"));
    }

    #[test]
    fn test_presence_and_normalization() {
        assert!(!Credentials::new("", "").is_present());
        assert!(!Credentials::new("  ", "secret").is_present());
        assert!(Credentials::new("a@b.co", "x").is_present());

        let creds = Credentials::new("  a@b.co ", "pw");
        assert_eq!(creds.normalized().email, "a@b.co");
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials::new("a@b.co", "hunter22");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("a@b.co"));
        assert!(!printed.contains("hunter22"));
    }
}
