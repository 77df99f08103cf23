//! Process-wide formatter.
//!
//! The registry holds one [`MessageFormatter`] snapshot in an [`ArcSwap`].
//! Readers take the current snapshot lock-free; writers build a modified copy
//! and swap it in (read-copy-update), so a single `validate` call always sees
//! one consistent formatter.
//!
//! The state is shared by every thread in the process. Concurrent overrides do
//! not corrupt it but still race: the last writer wins. Tests that override
//! the registry must serialize themselves and [`reset`] afterwards.

use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use super::{ErrorKind, FormatArgs, MessageFormatter};
use crate::env::Env;

static REGISTRY: LazyLock<ArcSwap<MessageFormatter>> =
    LazyLock::new(|| ArcSwap::from_pointee(MessageFormatter::stock()));

/// Current formatter snapshot.
#[inline]
pub fn global() -> Arc<MessageFormatter> {
    REGISTRY.load_full()
}

/// Replaces the process-wide formatter.
pub fn install(formatter: MessageFormatter) {
    tracing::debug!(?formatter, "installing process-wide message formatter");
    REGISTRY.store(Arc::new(formatter));
}

/// Merges template overrides into the process-wide formatter.
pub fn override_templates<I, S>(templates: I)
where
    I: IntoIterator<Item = (ErrorKind, S)>,
    S: Into<Cow<'static, str>>,
{
    let templates: Vec<(ErrorKind, Cow<'static, str>)> = templates
        .into_iter()
        .map(|(kind, t)| (kind, t.into()))
        .collect();
    tracing::debug!(count = templates.len(), "overriding process-wide templates");

    REGISTRY.rcu(|current| {
        let mut next = MessageFormatter::clone(current);
        next.override_templates(templates.iter().cloned());
        next
    });
}

/// Replaces the process-wide resolution strategy.
pub fn override_with<F>(format_fn: F)
where
    F: Fn(ErrorKind, &Env, &FormatArgs) -> String + Send + Sync + 'static,
{
    tracing::debug!("overriding process-wide format function");
    let format_fn = Arc::new(format_fn);

    REGISTRY.rcu(|current| {
        let mut next = MessageFormatter::clone(current);
        let format_fn = Arc::clone(&format_fn);
        next.override_with(move |kind, env, args| format_fn(kind, env, args));
        next
    });
}

/// Restores stock templates and the default resolution strategy.
pub fn reset() {
    tracing::debug!("resetting process-wide message formatter");
    REGISTRY.store(Arc::new(MessageFormatter::stock()));
}

/// Formats through the current process-wide formatter.
pub fn format(kind: ErrorKind, env: &Env, args: &FormatArgs) -> String {
    REGISTRY.load().format(kind, env, args)
}
