//! Declarative validators for application types.
//!
//! A [`Validator`] turns a value into the [`Aggregation`] describing what to
//! check on it. Any `Fn(&T) -> Aggregation` closure is a validator.
//!
//! # Examples
//!
//! ```rust
//! use nebula_validation::checks::{not_blank, positive};
//! use nebula_validation::{Aggregation, Validator};
//!
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! struct PersonValidator;
//!
//! impl Validator<Person> for PersonValidator {
//!     fn collect(&self, person: &Person) -> Aggregation {
//!         Aggregation::of([not_blank("name", &person.name), positive("age", person.age)])
//!     }
//! }
//!
//! let report = PersonValidator.validate(&Person { name: String::new(), age: 0 });
//! assert_eq!(report.error_count(), 2);
//! ```

use crate::aggregation::Aggregation;
use crate::env::Env;
use crate::formatter::MessageFormatter;
use crate::report::ValidationReport;

/// Builds the aggregation of checks for a `T`.
pub trait Validator<T: ?Sized> {
    /// Collects the checks for `value` without running them.
    fn collect(&self, value: &T) -> Aggregation;

    /// Validates `value` with an empty environment.
    fn validate(&self, value: &T) -> ValidationReport {
        self.collect(value).validate(&Env::empty())
    }

    /// Validates `value` against `env` with the process-wide formatter.
    fn validate_in(&self, value: &T, env: &Env) -> ValidationReport {
        self.collect(value).validate(env)
    }

    /// Validates `value` against `env` with an explicit formatter.
    fn validate_with(&self, value: &T, env: &Env, formatter: &MessageFormatter) -> ValidationReport {
        self.collect(value).validate_with(env, formatter)
    }

    /// Validator whose aggregation is `self`'s composed with `other`'s.
    fn compose<V>(self, other: V) -> Composed<Self, V>
    where
        Self: Sized,
        V: Validator<T>,
    {
        Composed {
            first: self,
            second: other,
        }
    }
}

impl<T, F> Validator<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> Aggregation,
{
    fn collect(&self, value: &T) -> Aggregation {
        self(value)
    }
}

/// Two validators run as one; see [`Aggregation::compose`] for the merge rules.
#[derive(Debug, Clone, Copy)]
pub struct Composed<A, B> {
    first: A,
    second: B,
}

impl<A, B> Composed<A, B> {
    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<T, A, B> Validator<T> for Composed<A, B>
where
    T: ?Sized,
    A: Validator<T>,
    B: Validator<T>,
{
    fn collect(&self, value: &T) -> Aggregation {
        self.first.collect(value).compose(&self.second.collect(value))
    }
}
