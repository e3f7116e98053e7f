//! Field Errors - per-field validation messages
//!
//! Validation of a request body runs every field check and collects the
//! failures instead of stopping at the first one. The result serializes as
//! `{"field": ["message", ...]}`.

use std::collections::BTreeMap;

use serde::Serialize;

use super::app_error::AppResult;

/// Message used when a required field is absent
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Ordered map of field name to validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a single failing field
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a message for `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Record the outcome of a validation step.
    ///
    /// Returns the accepted value, or `None` after recording the error's
    /// message under `field`.
    pub fn check<T>(&mut self, field: &str, result: AppResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.add(field, err.message());
                None
            }
        }
    }

    /// Unwrap a required input, recording [`REQUIRED_MESSAGE`] when absent
    pub fn require<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.add(field, REQUIRED_MESSAGE);
        }
        value
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}
