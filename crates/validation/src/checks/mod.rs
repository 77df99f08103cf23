//! Built-in checks.
//!
//! Each function wraps a simple predicate into a [`Thunk`] with a structural
//! [`ThunkKey`], so building the same check twice (same kind, field, value and
//! arguments) yields equal thunks that deduplicate inside an aggregation.
//!
//! All checks share one contract:
//!
//! 1. an [`optional`](Thunk::optional) thunk with an absent value is `Valid`;
//! 2. an absent value, or one failing the predicate, is `Invalid` with a
//!    message resolved through the active formatter;
//! 3. anything else is `Valid`.
//!
//! - **Presence**: [`not_null`], [`not_blank`]
//! - **Length**: [`min_length`], [`max_length`], [`length`]
//! - **Format**: [`email`]
//! - **Membership**: [`member_of`]
//! - **Numeric**: [`positive`], [`equal`], [`less`], [`less_equal`],
//!   [`greater`], [`greater_equal`] and their `*_within` variants

mod membership;
mod numeric;
mod string;
pub mod subject;

pub use membership::{PRESENT, member_of, not_null};
pub use numeric::{
    EPSILON, approx_eq, equal, equal_within, greater, greater_equal, greater_equal_within,
    greater_within, less, less_equal, less_equal_within, less_within, positive,
};
pub use string::{email, length, max_length, min_length, not_blank};
pub use subject::{Numeric, NumericSubject, TextSubject};

use crate::formatter::{ErrorKind, FormatArgs};
use crate::outcome::Outcome;
use crate::thunk::{Thunk, ThunkKey};

/// Wraps `predicate` over a possibly absent `value` into a keyed thunk.
pub(crate) fn check<T, P>(kind: ErrorKind, args: FormatArgs, value: Option<T>, predicate: P) -> Thunk
where
    T: Send + Sync + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    let key = ThunkKey::from_format_args(kind, &args);
    Thunk::keyed(key, move |scope| match &value {
        None if scope.is_optional() => Outcome::Valid,
        Some(value) if predicate(value) => Outcome::Valid,
        _ => scope.invalid(kind, &args),
    })
}
