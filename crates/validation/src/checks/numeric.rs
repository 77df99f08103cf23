//! Numeric checks.
//!
//! Every number is compared as `f64`. Comparisons are tolerance-aware: two
//! numbers closer than `epsilon` count as equal, so `less` rejects them and
//! `less_equal` accepts them.

use super::check;
use super::subject::{Numeric, NumericSubject};
use crate::formatter::{ErrorKind, FormatArgs};
use crate::thunk::Thunk;

/// Default comparison tolerance.
pub const EPSILON: f64 = 5.96e-8;

/// `true` when `value` and `reference` are identical or closer than `epsilon`.
#[must_use]
pub fn approx_eq(value: f64, reference: f64, epsilon: f64) -> bool {
    value == reference || (value - reference).abs() < epsilon
}

fn is_equal(value: f64, reference: f64, epsilon: f64) -> bool {
    approx_eq(value, reference, epsilon)
}

fn is_less(value: f64, reference: f64, epsilon: f64) -> bool {
    !approx_eq(value, reference, epsilon) && value - reference < epsilon
}

fn is_less_equal(value: f64, reference: f64, epsilon: f64) -> bool {
    approx_eq(value, reference, epsilon) || value - reference < epsilon
}

fn is_greater(value: f64, reference: f64, epsilon: f64) -> bool {
    !approx_eq(value, reference, epsilon) && value - reference > epsilon
}

fn is_greater_equal(value: f64, reference: f64, epsilon: f64) -> bool {
    approx_eq(value, reference, epsilon) || value - reference > epsilon
}

/// Fails unless the value is strictly greater than zero. No tolerance applies.
pub fn positive<V: NumericSubject>(field: impl Into<String>, value: V) -> Thunk {
    let value = value.into_number();
    let args = FormatArgs::new(field).with_value(value.map(|n| n.to_string()));
    check(ErrorKind::Positive, args, value, |n: &V::Number| n.to_f64() > 0.0)
}

fn compare<V, R>(
    kind: ErrorKind,
    field: impl Into<String>,
    value: V,
    reference: R,
    epsilon: f64,
    test: fn(f64, f64, f64) -> bool,
) -> Thunk
where
    V: NumericSubject,
    R: Numeric,
{
    let value = value.into_number();
    let args = FormatArgs::new(field)
        .with_value(value.map(|n| n.to_string()))
        .with_param("reference", reference)
        .with_param("epsilon", epsilon);
    let reference = reference.to_f64();
    check(kind, args, value, move |n: &V::Number| {
        test(n.to_f64(), reference, epsilon)
    })
}

pub fn equal<V: NumericSubject, R: Numeric>(field: impl Into<String>, value: V, reference: R) -> Thunk {
    equal_within(field, value, reference, EPSILON)
}

pub fn equal_within<V: NumericSubject, R: Numeric>(
    field: impl Into<String>,
    value: V,
    reference: R,
    epsilon: f64,
) -> Thunk {
    compare(ErrorKind::Equal, field, value, reference, epsilon, is_equal)
}

pub fn less<V: NumericSubject, R: Numeric>(field: impl Into<String>, value: V, reference: R) -> Thunk {
    less_within(field, value, reference, EPSILON)
}

pub fn less_within<V: NumericSubject, R: Numeric>(
    field: impl Into<String>,
    value: V,
    reference: R,
    epsilon: f64,
) -> Thunk {
    compare(ErrorKind::Less, field, value, reference, epsilon, is_less)
}

pub fn less_equal<V: NumericSubject, R: Numeric>(field: impl Into<String>, value: V, reference: R) -> Thunk {
    less_equal_within(field, value, reference, EPSILON)
}

pub fn less_equal_within<V: NumericSubject, R: Numeric>(
    field: impl Into<String>,
    value: V,
    reference: R,
    epsilon: f64,
) -> Thunk {
    compare(ErrorKind::LessEqual, field, value, reference, epsilon, is_less_equal)
}

pub fn greater<V: NumericSubject, R: Numeric>(field: impl Into<String>, value: V, reference: R) -> Thunk {
    greater_within(field, value, reference, EPSILON)
}

pub fn greater_within<V: NumericSubject, R: Numeric>(
    field: impl Into<String>,
    value: V,
    reference: R,
    epsilon: f64,
) -> Thunk {
    compare(ErrorKind::Greater, field, value, reference, epsilon, is_greater)
}

pub fn greater_equal<V: NumericSubject, R: Numeric>(field: impl Into<String>, value: V, reference: R) -> Thunk {
    greater_equal_within(field, value, reference, EPSILON)
}

pub fn greater_equal_within<V: NumericSubject, R: Numeric>(
    field: impl Into<String>,
    value: V,
    reference: R,
    epsilon: f64,
) -> Thunk {
    compare(ErrorKind::GreaterEqual, field, value, reference, epsilon, is_greater_equal)
}
