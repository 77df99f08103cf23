//! Result of evaluating a single unit of work.

use std::fmt;

use crate::error::EngineError;

/// A failed check: the field it applies to and the already formatted message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldError {
    field: String,
    message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Splits the error into `(field, message)`.
    pub fn into_parts(self) -> (String, String) {
        (self.field, self.message)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

/// Outcome of one [`Thunk`](crate::thunk::Thunk) evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    Invalid(FieldError),
}

impl Outcome {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid(FieldError::new(field, message))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the field error of an `Invalid` outcome.
    ///
    /// Asking a `Valid` outcome is a bug in the caller and yields
    /// [`EngineError::InvalidState`].
    pub fn error(&self) -> Result<&FieldError, EngineError> {
        match self {
            Self::Invalid(error) => Ok(error),
            Self::Valid => Err(EngineError::InvalidState),
        }
    }

    pub fn into_error(self) -> Result<FieldError, EngineError> {
        match self {
            Self::Invalid(error) => Ok(error),
            Self::Valid => Err(EngineError::InvalidState),
        }
    }

    pub fn field(&self) -> Result<&str, EngineError> {
        self.error().map(FieldError::field)
    }

    pub fn message(&self) -> Result<&str, EngineError> {
        self.error().map(FieldError::message)
    }
}
