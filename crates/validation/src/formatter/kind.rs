//! Error kinds understood by the message formatter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// Identifies which check failed, and therefore which template renders it.
///
/// Built-in checks use the stock variants. Application-defined checks can use
/// [`ErrorKind::Custom`] and register a template for it like any other kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    NotNull,
    NotBlank,
    Positive,
    MinLength,
    MaxLength,
    Length,
    Email,
    MemberOf,
    Equal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    /// Application-defined kind identified by its code.
    Custom(&'static str),
}

impl ErrorKind {
    /// Every kind that ships with a stock template.
    pub const STOCK: [ErrorKind; 13] = [
        ErrorKind::NotNull,
        ErrorKind::NotBlank,
        ErrorKind::Positive,
        ErrorKind::MinLength,
        ErrorKind::MaxLength,
        ErrorKind::Length,
        ErrorKind::Email,
        ErrorKind::MemberOf,
        ErrorKind::Equal,
        ErrorKind::Less,
        ErrorKind::LessEqual,
        ErrorKind::Greater,
        ErrorKind::GreaterEqual,
    ];

    /// Stable snake_case code, used in configuration files and thunk keys.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::NotNull => "not_null",
            ErrorKind::NotBlank => "not_blank",
            ErrorKind::Positive => "positive",
            ErrorKind::MinLength => "min_length",
            ErrorKind::MaxLength => "max_length",
            ErrorKind::Length => "length",
            ErrorKind::Email => "email",
            ErrorKind::MemberOf => "member_of",
            ErrorKind::Equal => "equal",
            ErrorKind::Less => "less",
            ErrorKind::LessEqual => "less_equal",
            ErrorKind::Greater => "greater",
            ErrorKind::GreaterEqual => "greater_equal",
            ErrorKind::Custom(code) => code,
        }
    }

    pub fn is_custom(self) -> bool {
        matches!(self, ErrorKind::Custom(_))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parses stock kinds only; custom kinds have no owned code to parse into.
impl FromStr for ErrorKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorKind::STOCK
            .into_iter()
            .find(|kind| kind.code() == s)
            .ok_or_else(|| EngineError::UnknownKind(s.to_owned()))
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for ErrorKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}
