//! Evaluation environment.
//!
//! An [`Env`] is an immutable string map handed to every check of one
//! `validate` call. It carries caller-level facts such as a locale or tenant
//! so message formatting can vary without touching check definitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Immutable key/value bag passed through a validation run.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::Env;
///
/// let env = Env::builder().set("locale", "el").build();
/// assert_eq!(env.get("locale"), Some("el"));
/// assert_eq!(Env::empty().get("locale"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Env {
    entries: HashMap<String, String>,
}

impl Env {
    /// Returns an environment with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts an accumulating builder.
    #[must_use]
    pub fn builder() -> EnvBuilder {
        EnvBuilder::default()
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Accumulating builder for [`Env`]. Later writes to a key replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct EnvBuilder {
    entries: HashMap<String, String>,
}

impl EnvBuilder {
    #[must_use = "builder methods must be chained or built"]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Env {
        Env {
            entries: self.entries,
        }
    }
}
