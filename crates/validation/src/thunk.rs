//! Units of work.
//!
//! A [`Thunk`] is a deferred, idempotent check: evaluating it against an
//! [`Env`] yields an [`Outcome`]. Thunks carry an ordering priority and a
//! blocking flag that the [`Aggregation`](crate::Aggregation) executor uses to
//! order and short-circuit a node's checks.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::env::Env;
use crate::formatter::{ErrorKind, FormatArgs, MessageFormatter};
use crate::outcome::Outcome;

/// Priority of ordinary thunks.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Priority of blocking thunks; they sort ahead of ordinary ones.
pub const BLOCKING_PRIORITY: i32 = 10;

type EvalFn = dyn Fn(&Scope<'_>) -> Outcome + Send + Sync;

// ============================================================================
// IDENTITY
// ============================================================================

/// Identity of a thunk inside an aggregation node.
///
/// Two thunks with equal keys are the same check: adding the second one to a
/// node is a no-op. Flags and priority are not part of the key, so a blocking
/// copy still deduplicates against the ordinary thunk it was made from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThunkKey {
    /// Rule application: error kind, field, and rendered captured arguments.
    Structural {
        kind: ErrorKind,
        field: String,
        args: Vec<String>,
    },
    /// Address of the shared closure allocation.
    Identity(usize),
}

impl ThunkKey {
    pub fn structural<I, S>(kind: ErrorKind, field: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Structural {
            kind,
            field: field.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Structural key derived from the arguments a check formats with.
    pub fn from_format_args(kind: ErrorKind, args: &FormatArgs) -> Self {
        let value = args.value().map_or_else(|| "\0absent".to_owned(), str::to_owned);
        let params = args.params().map(|(k, v)| format!("{k}={v}"));
        Self::structural(kind, args.field(), std::iter::once(value).chain(params))
    }
}

// ============================================================================
// SCOPE
// ============================================================================

/// What a thunk sees while it is evaluated.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    env: &'a Env,
    formatter: &'a MessageFormatter,
    optional: bool,
}

impl<'a> Scope<'a> {
    pub fn env(&self) -> &'a Env {
        self.env
    }

    pub fn formatter(&self) -> &'a MessageFormatter {
        self.formatter
    }

    /// Whether the thunk was marked [`optional`](Thunk::optional): an absent
    /// value must evaluate to `Valid` without running the predicate.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn format(&self, kind: ErrorKind, args: &FormatArgs) -> String {
        self.formatter.format(kind, self.env, args)
    }

    /// An `Invalid` outcome for `args.field()` with a formatted message.
    pub fn invalid(&self, kind: ErrorKind, args: &FormatArgs) -> Outcome {
        Outcome::invalid(args.field(), self.format(kind, args))
    }
}

// ============================================================================
// THUNK
// ============================================================================

/// A deferred check with ordering and short-circuit metadata.
///
/// Thunks are immutable; the flag builders return copies sharing the same
/// closure and key.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::{Env, Outcome, Thunk};
///
/// let check = Thunk::of(|_scope| Outcome::invalid("name", "name is taken"));
/// let blocking = check.clone().blocking();
///
/// assert_eq!(check, blocking); // same identity
/// assert!(blocking.is_blocking());
/// assert!(!check.evaluate_in(&Env::empty()).is_valid());
/// ```
#[derive(Clone)]
pub struct Thunk {
    key: ThunkKey,
    eval: Arc<EvalFn>,
    priority: i32,
    blocking: bool,
    optional: bool,
}

impl Thunk {
    /// Ordinary thunk identified by its closure allocation.
    pub fn of<F>(eval: F) -> Self
    where
        F: Fn(&Scope<'_>) -> Outcome + Send + Sync + 'static,
    {
        let eval: Arc<EvalFn> = Arc::new(eval);
        let key = ThunkKey::Identity(Arc::as_ptr(&eval).cast::<()>().addr());
        Self::from_parts(key, eval)
    }

    /// Blocking thunk identified by its closure allocation.
    pub fn blocking_of<F>(eval: F) -> Self
    where
        F: Fn(&Scope<'_>) -> Outcome + Send + Sync + 'static,
    {
        Self::of(eval).blocking()
    }

    /// Ordinary thunk with an explicit structural key.
    pub fn keyed<F>(key: ThunkKey, eval: F) -> Self
    where
        F: Fn(&Scope<'_>) -> Outcome + Send + Sync + 'static,
    {
        Self::from_parts(key, Arc::new(eval))
    }

    fn from_parts(key: ThunkKey, eval: Arc<EvalFn>) -> Self {
        Self {
            key,
            eval,
            priority: DEFAULT_PRIORITY,
            blocking: false,
            optional: false,
        }
    }

    /// Blocking copy: runs at [`BLOCKING_PRIORITY`] and stops its node once
    /// evaluated, whatever the outcome.
    pub fn blocking(self) -> Self {
        Self {
            priority: BLOCKING_PRIORITY,
            blocking: true,
            ..self
        }
    }

    /// Copy that evaluates to `Valid` when the checked value is absent.
    pub fn optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }

    pub fn with_priority(self, priority: i32) -> Self {
        Self { priority, ..self }
    }

    pub fn key(&self) -> &ThunkKey {
        &self.key
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Evaluates against `env`, formatting messages with `formatter`.
    pub fn evaluate(&self, env: &Env, formatter: &MessageFormatter) -> Outcome {
        let scope = Scope {
            env,
            formatter,
            optional: self.optional,
        };
        (self.eval)(&scope)
    }

    /// Evaluates using the process-wide formatter.
    pub fn evaluate_in(&self, env: &Env) -> Outcome {
        self.evaluate(env, &crate::formatter::global())
    }
}

impl PartialEq for Thunk {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Thunk {}

impl Hash for Thunk {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thunk")
            .field("key", &self.key)
            .field("priority", &self.priority)
            .field("blocking", &self.blocking)
            .field("optional", &self.optional)
            .finish_non_exhaustive()
    }
}
