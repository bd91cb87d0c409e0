//! Delta chain consistency rules
//!
//! `invariants` finds every violation; `validation` turns the first one into
//! an error for callers that only need a yes/no answer.

pub mod invariants;
pub mod validation;

pub use invariants::{ChainIssue, InconsistencyReason};
pub use validation::{validate, validate_all};
