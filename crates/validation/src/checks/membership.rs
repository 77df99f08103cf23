//! Presence and membership checks for arbitrary values.

use std::fmt;

use super::check;
use crate::formatter::{ErrorKind, FormatArgs};
use crate::thunk::Thunk;

/// `{value}` of a [`not_null`] check whose value is present.
pub const PRESENT: &str = "present";

/// Fails when the value is absent.
///
/// Any value type is accepted, including nested structs. Only presence is
/// recorded, so `{value}` renders as [`PRESENT`] or `null`.
pub fn not_null<T>(field: impl Into<String>, value: Option<T>) -> Thunk {
    let present = value.map(|_| ());
    let args = FormatArgs::new(field).with_value(present.map(|()| PRESENT.to_owned()));
    check(ErrorKind::NotNull, args, present, |_: &()| true)
}

/// Fails unless the value equals one of `allowed`.
///
/// The allowed values render as `[a, b, c]` under `{values}`.
pub fn member_of<T, V, I>(field: impl Into<String>, value: V, allowed: I) -> Thunk
where
    T: PartialEq + fmt::Display + Send + Sync + 'static,
    V: Into<Option<T>>,
    I: IntoIterator<Item = T>,
{
    let value = value.into();
    let allowed: Vec<T> = allowed.into_iter().collect();
    let args = FormatArgs::new(field)
        .with_value(value.as_ref().map(ToString::to_string))
        .with_param("values", render_list(&allowed));
    check(ErrorKind::MemberOf, args, value, move |v: &T| allowed.contains(v))
}

fn render_list<T: fmt::Display>(items: &[T]) -> String {
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
