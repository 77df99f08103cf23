//! Property-based tests for aggregation ordering and deduplication.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nebula_validation::prelude::*;
use proptest::prelude::*;

fn stock() -> MessageFormatter {
    MessageFormatter::stock()
}

// ============================================================================
// BLOCKING: the blocking unit wins wherever it is declared
// ============================================================================

proptest! {
    #[test]
    fn blocking_unit_reported_alone(others in 0usize..8, position in 0usize..8) {
        let mut thunks: Vec<Thunk> = (0..others)
            .map(|i| not_blank(format!("field{i}"), ""))
            .collect();
        let position = position.min(thunks.len());
        thunks.insert(position, not_blank("gate", "").blocking());

        let report = Aggregation::of(thunks).validate_with(&Env::empty(), &stock());

        prop_assert_eq!(report.error_count(), 1);
        prop_assert!(report.messages("gate").is_some());
    }

    #[test]
    fn blocking_unit_evaluated_once_before_others(others in 1usize..8) {
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let mut node = Aggregation::new();
        for i in 0..others {
            let order = Arc::clone(&order);
            node = node.with(Thunk::of(move |_| {
                order.lock().push(i);
                Outcome::Valid
            }));
        }
        let gate_order = Arc::clone(&order);
        node = node.with(Thunk::blocking_of(move |_| {
            gate_order.lock().push(usize::MAX);
            Outcome::Valid
        }));

        let report = node.validate_with(&Env::empty(), &stock());

        prop_assert!(report.is_valid());
        prop_assert_eq!(order.lock().clone(), vec![usize::MAX]);
    }
}

// ============================================================================
// DEDUP: rebuilding the same check never adds a unit
// ============================================================================

proptest! {
    #[test]
    fn same_check_deduplicates(value in ".{0,12}", copies in 1usize..6) {
        let node: Aggregation = (0..copies)
            .map(|_| min_length("name", value.as_str(), 4))
            .collect();

        prop_assert_eq!(node.unit_count(), 1);
    }

    #[test]
    fn shared_closure_evaluates_once(copies in 1usize..6) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let thunk = Thunk::of(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Outcome::Valid
        });

        let node: Aggregation = std::iter::repeat_n(thunk, copies).collect();
        node.validate_with(&Env::empty(), &stock());

        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

// ============================================================================
// IDEMPOTENCY: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn validation_is_idempotent(name in ".{0,10}", age in any::<i32>()) {
        let node = aggregate![not_blank("name", name.as_str()), positive("age", age)];
        let env = Env::empty();

        prop_assert_eq!(node.validate_with(&env, &stock()), node.validate_with(&env, &stock()));
    }
}
