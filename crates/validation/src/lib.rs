//! # nebula-validation
//!
//! Aggregates field checks into a tree and evaluates it into a nested error
//! report.
//!
//! ## Quick Start
//!
//! ```rust
//! use nebula_validation::prelude::*;
//!
//! let address = aggregate![not_blank("street", ""), length("zip", "1234", 5)];
//! let person = aggregate![
//!     not_blank("name", "Morty"),
//!     positive("age", 14_u32);
//!     "address" => address,
//! ];
//!
//! let report = person.validate(&Env::empty());
//! assert_eq!(report.error_count(), 2);
//! assert!(report.nested("address").is_some());
//!
//! // A blocking check stops its node even when it passes.
//! let gated = aggregate![not_blank("name", "Morty").blocking(); "address" => aggregate![not_blank("street", "")]];
//! assert!(gated.validate(&Env::empty()).is_valid());
//! ```
//!
//! ## Building Blocks
//!
//! - [`Thunk`]: a deferred check with a priority and blocking/optional flags
//! - [`Aggregation`]: a deduplicated set of thunks plus field-keyed children
//! - [`Env`]: read-only key/value context passed to every thunk
//! - [`MessageFormatter`]: templates or a function turning an [`ErrorKind`]
//!   into a message; a process-wide instance lives in [`formatter::global`]
//! - [`ValidationReport`]: the field-keyed error tree
//! - [`Validator`]: declares the aggregation for an application type
//!
//! ## Evaluation Rules
//!
//! Within one node, thunks run in ascending priority (blocking thunks first,
//! ties in insertion order). After any blocking thunk is evaluated, the node
//! stops: remaining thunks and all children are skipped. Otherwise every child
//! is evaluated and its non-empty report is merged under its field key.

pub mod aggregation;
pub mod checks;
pub mod env;
pub mod error;
pub mod formatter;
mod macros;
pub mod outcome;
pub mod prelude;
pub mod report;
pub mod thunk;
pub mod validator;

pub use aggregation::Aggregation;
pub use env::{Env, EnvBuilder};
pub use error::EngineError;
pub use formatter::{ErrorKind, FormatArgs, MessageFormatter};
pub use outcome::{FieldError, Outcome};
pub use report::{ErrorMap, ErrorNode, ValidationReport};
pub use thunk::{Scope, Thunk, ThunkKey};
pub use validator::{Composed, Validator};
