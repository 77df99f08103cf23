//! String checks.
//!
//! Lengths are measured in Unicode scalar values.

use std::sync::LazyLock;

use regex::Regex;

use super::check;
use super::subject::TextSubject;
use crate::formatter::{ErrorKind, FormatArgs};
use crate::thunk::Thunk;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_!#$%&'*+/=?`{|}~^-]+(?:\.[A-Za-z0-9_!#$%&'*+/=?`{|}~^-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,6}$",
    )
    .unwrap()
});

#[inline]
fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Fails when the value is absent or only whitespace.
///
/// Whitespace is Unicode `White_Space` as stripped by [`str::trim`], so a
/// value of only U+00A0 is blank. ASCII control characters such as `\0` are
/// not whitespace and make the value non-blank.
pub fn not_blank(field: impl Into<String>, value: impl TextSubject) -> Thunk {
    let value = value.into_text();
    let args = FormatArgs::new(field).with_value(value.clone());
    check(ErrorKind::NotBlank, args, value, |v: &String| !v.trim().is_empty())
}

pub fn min_length(field: impl Into<String>, value: impl TextSubject, min: usize) -> Thunk {
    let value = value.into_text();
    let args = FormatArgs::new(field)
        .with_value(value.clone())
        .with_param("min", min);
    check(ErrorKind::MinLength, args, value, move |v: &String| char_len(v) >= min)
}

pub fn max_length(field: impl Into<String>, value: impl TextSubject, max: usize) -> Thunk {
    let value = value.into_text();
    let args = FormatArgs::new(field)
        .with_value(value.clone())
        .with_param("max", max);
    check(ErrorKind::MaxLength, args, value, move |v: &String| char_len(v) <= max)
}

/// Fails unless the value has exactly `length` characters.
pub fn length(field: impl Into<String>, value: impl TextSubject, length: usize) -> Thunk {
    let value = value.into_text();
    let args = FormatArgs::new(field)
        .with_value(value.clone())
        .with_param("length", length);
    check(ErrorKind::Length, args, value, move |v: &String| char_len(v) == length)
}

pub fn email(field: impl Into<String>, value: impl TextSubject) -> Thunk {
    let value = value.into_text();
    let args = FormatArgs::new(field).with_value(value.clone());
    check(ErrorKind::Email, args, value, |v: &String| EMAIL_REGEX.is_match(v))
}
