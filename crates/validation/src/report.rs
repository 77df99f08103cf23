//! Outcome tree returned by a validation run.
//!
//! A [`ValidationReport`] maps field names either to the set of messages
//! reported for that field or to the nested error map of a child validation.
//! Serialized (serde, untagged) it has the shape web clients expect:
//!
//! ```json
//! { "age": ["age must be positive"], "address": { "zip": ["zip must be exactly 5 characters long"] } }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field-keyed error map; the externally observed error format.
pub type ErrorMap = BTreeMap<String, ErrorNode>;

/// Errors reported under one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorNode {
    /// Distinct messages from sibling checks on the same field.
    Messages(BTreeSet<String>),
    /// Errors of a nested validation.
    Nested(ErrorMap),
}

impl ErrorNode {
    pub fn messages(&self) -> Option<&BTreeSet<String>> {
        match self {
            ErrorNode::Messages(messages) => Some(messages),
            ErrorNode::Nested(_) => None,
        }
    }

    pub fn nested(&self) -> Option<&ErrorMap> {
        match self {
            ErrorNode::Nested(errors) => Some(errors),
            ErrorNode::Messages(_) => None,
        }
    }

    /// Number of messages in this node and below.
    pub fn error_count(&self) -> usize {
        match self {
            ErrorNode::Messages(messages) => messages.len(),
            ErrorNode::Nested(errors) => errors.values().map(ErrorNode::error_count).sum(),
        }
    }
}

fn flatten_into<'a>(prefix: &str, errors: &'a ErrorMap, out: &mut Vec<(String, &'a str)>) {
    for (field, node) in errors {
        let path = if prefix.is_empty() {
            field.clone()
        } else {
            format!("{prefix}.{field}")
        };
        match node {
            ErrorNode::Messages(messages) => {
                out.extend(messages.iter().map(|m| (path.clone(), m.as_str())));
            }
            ErrorNode::Nested(nested) => flatten_into(&path, nested, out),
        }
    }
}

/// Result of [`Aggregation::validate`](crate::Aggregation::validate).
///
/// Valid exactly when the error map is empty. Whether the run was cut short by
/// a blocking check is tracked separately and never shows up in the errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: ErrorMap,
    #[serde(skip)]
    blocked: bool,
}

impl ValidationReport {
    /// A report without errors.
    #[must_use]
    pub fn valid() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(errors: ErrorMap, blocked: bool) -> Self {
        Self { errors, blocked }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorMap {
        self.errors
    }

    /// Whether a blocking check stopped the node that produced this report.
    pub(crate) fn was_blocked(&self) -> bool {
        self.blocked
    }

    /// Merges a child's errors under `field`, replacing any entry already there.
    pub(crate) fn put(&mut self, field: impl Into<String>, nested: ValidationReport) {
        self.errors
            .insert(field.into(), ErrorNode::Nested(nested.errors));
    }

    /// Messages reported directly for `field`.
    pub fn messages(&self, field: &str) -> Option<&BTreeSet<String>> {
        self.errors.get(field).and_then(ErrorNode::messages)
    }

    /// Nested error map reported for `field`.
    pub fn nested(&self, field: &str) -> Option<&ErrorMap> {
        self.errors.get(field).and_then(ErrorNode::nested)
    }

    /// Total number of messages in the tree.
    pub fn error_count(&self) -> usize {
        self.errors.values().map(ErrorNode::error_count).sum()
    }

    /// All messages keyed by dotted path, e.g. `("pet[1].name", "name cannot be blank")`.
    pub fn flatten(&self) -> Vec<(String, &str)> {
        let mut out = Vec::with_capacity(self.error_count());
        flatten_into("", &self.errors, &mut out);
        out
    }

    /// The error tree as a JSON value, in the same shape `Serialize` produces.
    pub fn to_json(&self) -> serde_json::Value {
        // string-keyed maps of strings always serialize
        serde_json::to_value(self).unwrap_or_default()
    }

    /// `Ok(value)` when valid, otherwise the error map.
    pub fn into_result<T>(self, value: T) -> Result<T, ErrorMap> {
        if self.is_valid() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }

    /// Calls `on_valid` or hands the error map to `on_invalid`.
    pub fn get_or_else<R>(
        self,
        on_valid: impl FnOnce() -> R,
        on_invalid: impl FnOnce(ErrorMap) -> R,
    ) -> R {
        if self.is_valid() {
            on_valid()
        } else {
            on_invalid(self.errors)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        writeln!(f, "validation failed with {} error(s):", self.error_count())?;
        for (path, message) in self.flatten() {
            writeln!(f, "  {path}: {message}")?;
        }
        Ok(())
    }
}
