use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single rejected field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Join field errors into one line, e.g. `latitude: ..., altitude: ...`.
pub fn describe(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {}", describe(.0))]
    Validation(Vec<FieldError>),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// `Ok(())` when nothing was rejected, otherwise every collected error at once.
    pub fn check(errors: Vec<FieldError>) -> Result<(), ModelError> {
        if errors.is_empty() { Ok(()) } else { Err(ModelError::Validation(errors)) }
    }
}
