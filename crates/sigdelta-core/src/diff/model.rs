//! Parameter-level diff output types.
//!
//! A `Changed` delta entry only records before/after signatures; these edits
//! explain it one parameter at a time so reviewers can trace each change.

use serde::{Deserialize, Serialize};

use crate::model::TypeExpr;

/// A single parameter-level difference between two signatures of one routine
///
/// Parameters are matched by base name, so `status` -> `status=` is an
/// `Optionality` edit rather than a removal plus an addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ParamEdit {
    /// Return type differs
    ReturnType { old: TypeExpr, new: TypeExpr },
    /// Base name present only in the newer signature
    Added {
        name: String,
        optional: bool,
        type_expr: TypeExpr,
        position: usize,
    },
    /// Base name present only in the older signature
    Removed {
        name: String,
        optional: bool,
        type_expr: TypeExpr,
        position: usize,
    },
    /// Matched parameter whose type differs
    Retyped {
        name: String,
        old: TypeExpr,
        new: TypeExpr,
    },
    /// Matched parameter whose optionality marker differs
    Optionality {
        name: String,
        was_optional: bool,
        now_optional: bool,
    },
    /// Matched parameter whose order relative to the other matched parameters changed
    Moved { name: String, from: usize, to: usize },
}

impl ParamEdit {
    /// Base name of the parameter this edit concerns; `None` for the return slot
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::ReturnType { .. } => None,
            Self::Added { name, .. }
            | Self::Removed { name, .. }
            | Self::Retyped { name, .. }
            | Self::Optionality { name, .. }
            | Self::Moved { name, .. } => Some(name),
        }
    }
}
