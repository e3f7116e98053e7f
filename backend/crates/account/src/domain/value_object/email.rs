//! Email Value Object
//!
//! Represents a validated, lower-cased email address. Email is the login
//! identifier, so uniqueness is checked against the normalized form.

use std::sync::LazyLock;

use kernel::error::app_error::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Message for a malformed address
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address";

/// Message for an address that is already registered
pub const EMAIL_TAKEN_MESSAGE: &str = "An account with this email already exists!";

/// Local part must not open with a digit or symbol; the domain is lower-case
/// labels with a 2+ letter TLD and an optional second-level suffix.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[^0-9!@#$%^&*(+=)\\\[\].></{}`]\w+([._\-]?\w+)*@([a-z\d\-]+)\.([a-z]{2,})(\.[a-z]{2,})?$",
    )
    .expect("EMAIL_PATTERN: invalid regex pattern")
});

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() || email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(INVALID_EMAIL_MESSAGE));
        }

        if !EMAIL_PATTERN.is_match(&email) {
            return Err(AppError::bad_request(INVALID_EMAIL_MESSAGE));
        }

        Ok(Self(email))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(Email::new("ada@example.com").is_ok());
        assert!(Email::new("ada.lovelace@example.com").is_ok());
        assert!(Email::new("ada_l-2@mail.example.co").is_ok());
        assert!(Email::new("ada_l@example.co.uk").is_ok());
        assert!(Email::new("grace-hopper@navy.mil").is_ok());
    }

    #[test]
    fn test_normalization() {
        let email = Email::new("  Ada@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_invalid_emails() {
        assert!(Email::new("").is_err());
        assert!(Email::new("no-at-sign.com").is_err());
        assert!(Email::new("1ada@example.com").is_err());
        assert!(Email::new("ada@example").is_err());
        assert!(Email::new("ada@example.c").is_err());
        assert!(Email::new("ada@@example.com").is_err());

        let err = Email::new("not an email").unwrap_err();
        assert_eq!(err.message(), INVALID_EMAIL_MESSAGE);
    }

    #[test]
    fn test_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(Email::new(long).is_err());
    }
}
