//! Person Name Value Object
//!
//! First and last names are stored as entered (trimmed) and must consist of
//! letters only. Letters are Unicode alphabetic characters, so "Zoë" and
//! "Łukasz" are accepted while "Ada1" and "Mary Ann" are not.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

/// Maximum name length in characters
pub const NAME_MAX_LENGTH: usize = 50;

/// Which name field is being validated; selects the error wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    First,
    Last,
}

impl NameField {
    fn label(self) -> &'static str {
        match self {
            NameField::First => "First name",
            NameField::Last => "Last name",
        }
    }
}

/// Validated first or last name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(raw: impl Into<String>, field: NameField) -> AppResult<Self> {
        let raw = raw.into();
        let name = raw.trim();

        if name.is_empty() {
            return Err(AppError::bad_request("This field may not be blank."));
        }

        if !name.chars().all(char::is_alphabetic) {
            return Err(AppError::bad_request(format!(
                "{} must contain only letters",
                field.label()
            )));
        }

        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Ensure this field has no more than {} characters.",
                NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name.to_string()))
    }

    pub fn first(raw: impl Into<String>) -> AppResult<Self> {
        Self::new(raw, NameField::First)
    }

    pub fn last(raw: impl Into<String>) -> AppResult<Self> {
        Self::new(raw, NameField::Last)
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
