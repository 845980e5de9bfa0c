use models::errors::{describe, FieldError, ModelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {}", describe(.0))]
    Validation(Vec<FieldError>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Field-level detail when this is a validation failure from either layer.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            ServiceError::Validation(f) | ServiceError::Model(ModelError::Validation(f)) => Some(f.as_slice()),
            _ => None,
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) | ServiceError::Model(ModelError::Validation(_)) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_)) => 1200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        assert_eq!(ServiceError::not_found("Peak").to_string(), "not found: Peak not found");
    }

    #[test]
    fn model_validation_exposes_fields() {
        let e: ServiceError = ModelError::Validation(vec![FieldError::new("altitude", "too low")]).into();
        assert_eq!(e.field_errors().map(|f| f.len()), Some(1));
        assert_eq!(e.code(), 1001);
        assert!(ServiceError::Db("boom".into()).field_errors().is_none());
    }
}
