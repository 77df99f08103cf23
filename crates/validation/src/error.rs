//! Programmer-error conditions raised by the engine.
//!
//! Expected validation failures never surface here: they are collected as
//! [`FieldError`](crate::outcome::FieldError)s inside a
//! [`ValidationReport`](crate::report::ValidationReport). `EngineError` only
//! covers misuse of the API and malformed configuration.

/// Errors caused by incorrect use of the engine or bad configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EngineError {
    /// A `Valid` outcome was asked for its field error.
    #[error("invalid state: a valid outcome carries no field error")]
    InvalidState,

    /// A template override referenced an error kind that does not exist.
    #[error("unknown error kind `{0}`")]
    UnknownKind(String),

    /// Template overrides could not be parsed.
    #[error("malformed template overrides: {0}")]
    MalformedTemplates(#[from] serde_json::Error),
}
