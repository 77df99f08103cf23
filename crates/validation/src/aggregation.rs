//! The execution tree.
//!
//! An [`Aggregation`] node holds a deduplicated set of [`Thunk`]s plus
//! field-keyed child aggregations. [`Aggregation::validate`] runs the node's
//! thunks in priority order, stops the node at the first blocking thunk it
//! evaluates, and (unless blocked) recurses into the children, merging every
//! invalid child report under its field key.
//!
//! # Examples
//!
//! ```rust
//! use nebula_validation::checks::{length, not_blank, positive};
//! use nebula_validation::{Aggregation, Env};
//!
//! let address = Aggregation::of([not_blank("street", ""), length("zip", "123456", 5)]);
//! let person = Aggregation::of([not_blank("name", "Morty"), positive("age", 10_u32)])
//!     .nested("address", address);
//!
//! let report = person.validate(&Env::empty());
//! assert!(report.messages("name").is_none());
//! assert_eq!(report.nested("address").map(|errors| errors.len()), Some(2));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::env::Env;
use crate::formatter::{self, MessageFormatter};
use crate::outcome::Outcome;
use crate::report::{ErrorNode, ValidationReport};
use crate::thunk::{Thunk, ThunkKey};
use crate::validator::Validator;

/// A node of the validation tree.
///
/// Units are kept in insertion order and deduplicated by [`ThunkKey`]; the
/// first thunk inserted under a key wins. Children are kept in insertion order
/// and a later child under the same field replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    units: IndexMap<ThunkKey, Thunk>,
    children: IndexMap<String, Aggregation>,
}

impl Aggregation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Node holding `thunks`, duplicates dropped.
    pub fn of(thunks: impl IntoIterator<Item = Thunk>) -> Self {
        thunks.into_iter().fold(Self::new(), Self::with)
    }

    // ========================================================================
    // BUILDERS
    // ========================================================================

    /// Adds a thunk unless an equal one is already present.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, thunk: Thunk) -> Self {
        self.insert_unit(thunk);
        self
    }

    /// Attaches `child` under `field`, replacing any previous child there.
    #[must_use = "builder methods must be chained or built"]
    pub fn nested(mut self, field: impl Into<String>, child: Aggregation) -> Self {
        self.children.insert(field.into(), child);
        self
    }

    /// Attaches the aggregation `validator` collects for `value`.
    #[must_use = "builder methods must be chained or built"]
    pub fn nested_with<T, V>(self, field: impl Into<String>, validator: &V, value: &T) -> Self
    where
        T: ?Sized,
        V: Validator<T> + ?Sized,
    {
        self.nested(field, validator.collect(value))
    }

    /// Like [`nested_with`](Self::nested_with); an absent value adds nothing.
    #[must_use = "builder methods must be chained or built"]
    pub fn nested_optional<T, V>(self, field: impl Into<String>, validator: &V, value: Option<&T>) -> Self
    where
        T: ?Sized,
        V: Validator<T> + ?Sized,
    {
        match value {
            Some(value) => self.nested_with(field, validator, value),
            None => self,
        }
    }

    /// Attaches one child per element under `"<field>[<index>]"`.
    #[must_use = "builder methods must be chained or built"]
    pub fn nested_list<'a, T, V, I>(self, field: &str, validator: &V, items: I) -> Self
    where
        T: 'a,
        V: Validator<T> + ?Sized,
        I: IntoIterator<Item = &'a T>,
    {
        items
            .into_iter()
            .enumerate()
            .fold(self, |node, (index, item)| {
                node.nested_with(format!("{field}[{index}]"), validator, item)
            })
    }

    fn insert_unit(&mut self, thunk: Thunk) {
        if let Entry::Vacant(slot) = self.units.entry(thunk.key().clone()) {
            slot.insert(thunk);
        }
    }

    // ========================================================================
    // COMPOSITION
    // ========================================================================

    /// New node with the union of both unit sets and `other`'s children laid
    /// over this node's.
    ///
    /// Units of `self` come first; a unit of `other` equal to one of `self` is
    /// dropped. On a child key collision `other`'s subtree replaces this one
    /// whole, so `a.compose(&b)` and `b.compose(&a)` may differ.
    #[must_use]
    pub fn compose(&self, other: &Aggregation) -> Aggregation {
        let mut composed = self.clone();
        for thunk in other.units.values() {
            composed.insert_unit(thunk.clone());
        }
        for (field, child) in &other.children {
            composed.children.insert(field.clone(), child.clone());
        }
        composed
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Units in insertion order.
    pub fn units(&self) -> impl Iterator<Item = &Thunk> {
        self.units.values()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &Aggregation)> {
        self.children.iter().map(|(field, child)| (field.as_str(), child))
    }

    pub fn child(&self, field: &str) -> Option<&Aggregation> {
        self.children.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty() && self.children.is_empty()
    }

    // ========================================================================
    // EXECUTION
    // ========================================================================

    /// Validates against `env` with the process-wide formatter.
    ///
    /// The formatter is read once, so the whole tree formats with the same
    /// snapshot even if the registry changes mid-run.
    pub fn validate(&self, env: &Env) -> ValidationReport {
        let formatter = formatter::global();
        self.validate_with(env, &formatter)
    }

    /// Validates against `env` with an explicit formatter.
    pub fn validate_with(&self, env: &Env, formatter: &MessageFormatter) -> ValidationReport {
        let mut report = self.run_units(env, formatter);

        if report.was_blocked() {
            tracing::trace!(
                children = self.children.len(),
                "node blocked, skipping nested validation"
            );
            return report;
        }

        for (field, child) in &self.children {
            let nested = child.validate_with(env, formatter);
            if !nested.is_valid() {
                tracing::trace!(%field, errors = nested.error_count(), "merging nested errors");
                report.put(field.as_str(), nested);
            }
        }

        report
    }

    /// Runs this node's own units: priority order, ties in insertion order,
    /// stopping right after the first blocking unit.
    fn run_units(&self, env: &Env, formatter: &MessageFormatter) -> ValidationReport {
        let mut ordered: Vec<&Thunk> = self.units.values().collect();
        ordered.sort_by_key(|thunk| thunk.priority());

        let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut blocked = false;
        let mut evaluated = 0usize;

        for thunk in ordered {
            evaluated += 1;
            if let Outcome::Invalid(error) = thunk.evaluate(env, formatter) {
                let (field, message) = error.into_parts();
                grouped.entry(field).or_default().insert(message);
            }
            if thunk.is_blocking() {
                blocked = true;
                break;
            }
        }

        tracing::trace!(
            evaluated,
            total = self.units.len(),
            blocked,
            failed_fields = grouped.len(),
            "evaluated node units"
        );

        let errors = grouped
            .into_iter()
            .map(|(field, messages)| (field, ErrorNode::Messages(messages)))
            .collect();
        ValidationReport::from_parts(errors, blocked)
    }
}

impl FromIterator<Thunk> for Aggregation {
    fn from_iter<I: IntoIterator<Item = Thunk>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl Extend<Thunk> for Aggregation {
    fn extend<I: IntoIterator<Item = Thunk>>(&mut self, iter: I) {
        for thunk in iter {
            self.insert_unit(thunk);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::report::ErrorMap;

    fn fail(field: &'static str, message: &'static str) -> Thunk {
        Thunk::of(move |_| Outcome::invalid(field, message))
    }

    fn pass() -> Thunk {
        Thunk::of(|_| Outcome::Valid)
    }

    fn counted(calls: &Arc<AtomicUsize>, outcome: Outcome) -> Thunk {
        let calls = Arc::clone(calls);
        Thunk::of(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            outcome.clone()
        })
    }

    fn run(aggregation: &Aggregation) -> ValidationReport {
        aggregation.validate_with(&Env::empty(), &MessageFormatter::stock())
    }

    fn leaf(messages: &[&str]) -> ErrorNode {
        ErrorNode::Messages(messages.iter().map(|m| (*m).to_owned()).collect())
    }

    #[test]
    fn test_empty_is_valid() {
        let aggregation = Aggregation::new();
        assert!(aggregation.is_empty());
        assert!(run(&aggregation).is_valid());
    }

    #[test]
    fn test_same_thunk_added_twice_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let thunk = counted(&calls, Outcome::invalid("name", "taken"));
        let aggregation = Aggregation::of([thunk.clone(), thunk.clone()]).with(thunk);

        assert_eq!(aggregation.unit_count(), 1);
        let report = run(&aggregation);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.messages("name").unwrap().len(), 1);
    }

    #[test]
    fn test_blocking_runs_first_and_stops_node() {
        let calls = Arc::new(AtomicUsize::new(0));
        let aggregation = Aggregation::of([
            counted(&calls, Outcome::invalid("age", "age must be positive")),
            fail("name", "name cannot be blank").blocking(),
        ]);

        let report = run(&aggregation);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(report.was_blocked());

        let mut expected = ErrorMap::new();
        expected.insert("name".into(), leaf(&["name cannot be blank"]));
        assert_eq!(report.errors(), &expected);
    }

    #[test]
    fn test_passing_blocking_thunk_still_blocks() {
        let calls = Arc::new(AtomicUsize::new(0));
        let child = Aggregation::of([counted(&calls, Outcome::invalid("zip", "bad"))]);
        let aggregation = Aggregation::of([
            counted(&calls, Outcome::invalid("age", "age must be positive")),
            pass().blocking(),
        ])
        .nested("address", child);

        let report = run(&aggregation);
        assert!(report.is_valid());
        assert!(report.was_blocked());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_equal_priority_keeps_insertion_order() {
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let record = |name: &'static str| {
            let order = Arc::clone(&order);
            Thunk::of(move |_| {
                order.lock().push(name);
                Outcome::Valid
            })
        };

        let aggregation = Aggregation::of([
            record("c"),
            record("a"),
            record("first").with_priority(1),
            record("b"),
        ]);
        run(&aggregation);

        assert_eq!(*order.lock(), vec!["first", "c", "a", "b"]);
    }

    #[test]
    fn test_second_blocking_thunk_never_runs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let aggregation = Aggregation::of([
            fail("a", "first").blocking(),
            counted(&calls, Outcome::invalid("b", "second")).blocking(),
        ]);

        let report = run(&aggregation);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_children_run_even_when_parent_has_errors() {
        let aggregation = Aggregation::of([fail("age", "age must be positive")])
            .nested("address", Aggregation::of([fail("zip", "zip is wrong")]));

        let report = run(&aggregation);
        assert_eq!(report.error_count(), 2);
        assert_eq!(
            report.nested("address").unwrap().get("zip"),
            Some(&leaf(&["zip is wrong"]))
        );
    }

    #[test]
    fn test_valid_children_are_not_merged() {
        let aggregation = Aggregation::new()
            .nested("ok", Aggregation::of([pass()]))
            .nested("blocked_but_valid", Aggregation::of([pass().blocking()]));

        let report = run(&aggregation);
        assert!(report.is_valid());
        assert!(report.errors().is_empty());
    }

    #[test]
    fn test_blocking_in_child_only_stops_that_child() {
        let grandchild = Aggregation::of([fail("deep", "unreachable")]);
        let child = Aggregation::of([fail("street", "street cannot be blank").blocking()])
            .nested("geo", grandchild);
        let aggregation = Aggregation::of([fail("age", "age must be positive")])
            .nested("address", child);

        let report = run(&aggregation);
        let address = report.nested("address").unwrap();
        assert_eq!(address.len(), 1);
        assert!(address.contains_key("street"));
        assert!(report.messages("age").is_some());
    }

    #[test]
    fn test_deeply_nested_tree() {
        let aggregation = Aggregation::new().nested(
            "a",
            Aggregation::new().nested("b", Aggregation::of([fail("c", "too deep")])),
        );

        let report = run(&aggregation);
        assert_eq!(report.flatten(), vec![("a.b.c".to_owned(), "too deep")]);
    }

    #[test]
    fn test_compose_unions_units_and_overlays_children() {
        let shared = fail("name", "name cannot be blank");
        let left = Aggregation::of([shared.clone()])
            .nested("address", Aggregation::of([fail("street", "left street")]))
            .nested("only_left", Aggregation::of([fail("x", "left only")]));
        let right = Aggregation::of([shared, fail("age", "age must be positive")])
            .nested("address", Aggregation::of([fail("zip", "right zip")]));

        let composed = left.compose(&right);
        assert_eq!(composed.unit_count(), 2);

        let report = run(&composed);
        let address = report.nested("address").unwrap();
        assert!(address.contains_key("zip"));
        assert!(!address.contains_key("street"));
        assert!(report.nested("only_left").is_some());

        // inputs untouched
        assert_eq!(left.unit_count(), 1);
        assert!(left.child("address").unwrap().units().count() == 1);
        assert_eq!(right.children().count(), 1);
    }

    #[test]
    fn test_compose_is_not_commutative_for_children() {
        let a = Aggregation::new().nested("k", Aggregation::of([fail("from", "a")]));
        let b = Aggregation::new().nested("k", Aggregation::of([fail("from", "b")]));

        let ab = run(&a.compose(&b));
        let ba = run(&b.compose(&a));
        assert_eq!(ab.flatten(), vec![("k.from".to_owned(), "b")]);
        assert_eq!(ba.flatten(), vec![("k.from".to_owned(), "a")]);
    }

    #[test]
    fn test_nested_replaces_child_with_same_key() {
        let aggregation = Aggregation::new()
            .nested("pet", Aggregation::of([fail("name", "first")]))
            .nested("pet", Aggregation::of([fail("name", "second")]));

        assert_eq!(aggregation.children().count(), 1);
        assert_eq!(run(&aggregation).flatten(), vec![("pet.name".to_owned(), "second")]);
    }

    #[test]
    fn test_extend_and_collect() {
        let thunk = fail("a", "x");
        let mut aggregation: Aggregation = [thunk.clone(), pass()].into_iter().collect();
        aggregation.extend([thunk, pass()]);
        assert_eq!(aggregation.unit_count(), 3);
    }
}
