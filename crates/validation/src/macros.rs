//! Declarative construction of aggregation trees.

// ============================================================================
// AGGREGATE MACRO
// ============================================================================

/// Builds an [`Aggregation`](crate::Aggregation) from thunks and, after a `;`,
/// `field => child` pairs.
///
/// ```rust
/// use nebula_validation::aggregate;
/// use nebula_validation::checks::{not_blank, positive};
///
/// let pet = aggregate![not_blank("name", "Rex")];
/// let owner = aggregate![
///     not_blank("name", ""),
///     positive("age", 3_u8);
///     "pet" => pet,
/// ];
/// assert_eq!(owner.unit_count(), 2);
/// assert!(owner.child("pet").is_some());
/// ```
#[macro_export]
macro_rules! aggregate {
    () => {
        $crate::Aggregation::new()
    };
    ($($thunk:expr),* ; $($field:expr => $child:expr),* $(,)?) => {
        $crate::aggregate![$($thunk),*]$(.nested($field, $child))*
    };
    ($($thunk:expr),+ $(,)?) => {
        $crate::Aggregation::new()$(.with($thunk))+
    };
}

// ============================================================================
// TESTS
// ============================================================================
