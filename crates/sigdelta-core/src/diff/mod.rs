//! Signature table diff engine.
//!
//! Compares two signature tables and produces the minimal delta between
//! them, plus parameter-level explanations of every changed routine.
//!
//! ## Entry point
//!
//! ```
//! use sigdelta_core::diff::diff;
//! use sigdelta_core::model::{Signature, SignatureTable};
//!
//! let mut older = SignatureTable::new();
//! older.insert("strlen", Signature::new("int").with_param("string", "string").unwrap());
//! let newer = older.clone();
//!
//! assert!(diff(&older, &newer).is_empty());
//! ```
//!
//! ## Guarantees
//!
//! - **Minimality**: routines with equal signatures never appear in the delta.
//! - **Parameter identity**: parameters are matched on base name, so marker
//!   changes are parameter edits, never removal plus addition.
//! - **Determinism**: entries are ordered by routine name.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{diff, diff_signatures};
pub use human_summary::render_delta_summary;
pub use model::ParamEdit;
