//! Prelude module for convenient imports.
//!
//! ```rust
//! use nebula_validation::prelude::*;
//!
//! let report = aggregate![email("mail", "rick@citadel.org")].validate(&Env::empty());
//! assert!(report.is_valid());
//! ```

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::aggregate;
pub use crate::{
    Aggregation, Composed, EngineError, Env, EnvBuilder, ErrorMap, ErrorNode, FieldError, Outcome,
    Scope, Thunk, ThunkKey, ValidationReport, Validator,
};

// ============================================================================
// MESSAGES
// ============================================================================

pub use crate::formatter::{ErrorKind, FormatArgs, MessageFormatter};

// ============================================================================
// CHECKS
// ============================================================================

#[allow(clippy::wildcard_imports, ambiguous_glob_reexports)]
pub use crate::checks::*;
