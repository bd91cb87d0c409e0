//! sigdelta Core - versioned routine signature kernel
//!
//! Keeps the routine signatures of many language versions as one full
//! baseline table plus a chain of minimal per-transition deltas:
//! - Signature and signature table models with order-preserving persistence
//! - Diff engine producing minimal deltas and parameter-level edits
//! - Contiguous delta chain with range queries
//! - Resolver reconstructing any supported version from the baseline
//! - Consistency validation of a chain before it is trusted
//! - Error and logging facilities shared with the store and CLI crates

pub mod chain;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod resolver;
pub mod rules;

#[doc(hidden)]
pub use tracing;

pub use sigdelta_core_types;
pub use sigdelta_core_types::{Version, VersionTransition};

// Re-export commonly used types
pub use chain::DeltaChain;
pub use diff::{diff, render_delta_summary, ParamEdit};
pub use errors::{ExError, ExErrorKind, Result, SigDeltaError};
pub use model::{
    ChangeKind, Delta, DeltaStats, Parameter, ParameterKey, RoutineChange, Signature,
    SignatureTable, TypeExpr,
};
pub use resolver::{resolve, Resolver};
pub use rules::{validate, validate_all, ChainIssue, InconsistencyReason};
