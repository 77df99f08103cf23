//! Structured arguments handed to message formatting.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

/// Rendering used for an absent value.
pub const ABSENT: &str = "null";

/// Arguments available to a message template or formatting function.
///
/// Every check supplies the field name and the rendered value under test.
/// Check-specific parameters (a length bound, a comparison reference, the
/// allowed values) are stored as ordered key/value pairs, typically 0-2 of
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatArgs {
    field: String,
    value: Option<String>,
    params: SmallVec<[(Cow<'static, str>, String); 2]>,
}

impl FormatArgs {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Self::default()
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<Cow<'static, str>>, value: impl fmt::Display) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// The rendered value under test, `None` when it was absent.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Looks up a check-specific parameter by name.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Resolves a template placeholder.
    ///
    /// `field`/`0` and `value`/`1` are always available; `2`, `3`, ... index
    /// the check-specific params in insertion order; any other name is looked
    /// up as a param.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "field" | "0" => Some(self.field.as_str()),
            "value" | "1" => Some(self.value().unwrap_or(ABSENT)),
            _ => match name.parse::<usize>() {
                Ok(position) if position >= 2 => {
                    self.params.get(position - 2).map(|(_, v)| v.as_str())
                }
                Ok(_) => None,
                Err(_) => self.param(name),
            },
        }
    }
}
