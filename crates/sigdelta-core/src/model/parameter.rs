use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Result, SigDeltaError};

/// Persisted key of the return slot
pub const RETURN_KEY: &str = "0";

/// Persisted suffix marking a parameter optional
pub const OPTIONAL_MARKER: char = '=';

/// Opaque type expression token (e.g. `int|string`)
///
/// Never parsed or decomposed; only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeExpr(String);

impl TypeExpr {
    pub fn new(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeExpr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeExpr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one slot in a signature
///
/// The persisted form decorates optional names with a trailing `=`; here the
/// marker is an explicit flag so that base-name matching never depends on
/// string suffixes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterKey {
    /// The return slot (persisted as `0`)
    Return,
    /// A named positional parameter
    Named { name: String, optional: bool },
}

impl ParameterKey {
    /// Parse a persisted key (`0`, `days`, `serial=`)
    ///
    /// # Errors
    ///
    /// Returns `InvalidSignature` for an empty name or a bare `=`.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw == RETURN_KEY {
            return Ok(Self::Return);
        }
        let (name, optional) = match raw.strip_suffix(OPTIONAL_MARKER) {
            Some(base) => (base, true),
            None => (raw, false),
        };
        if name.is_empty() {
            return Err(SigDeltaError::InvalidSignature {
                reason: format!("parameter key '{}' has an empty name", raw),
            });
        }
        Ok(Self::Named {
            name: name.to_string(),
            optional,
        })
    }

    /// Base name without the optionality marker; `None` for the return slot
    pub fn base_name(&self) -> Option<&str> {
        match self {
            Self::Return => None,
            Self::Named { name, .. } => Some(name),
        }
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Return => f.write_str(RETURN_KEY),
            Self::Named { name, optional } => {
                f.write_str(name)?;
                if *optional {
                    write!(f, "{}", OPTIONAL_MARKER)?;
                }
                Ok(())
            }
        }
    }
}

/// A named parameter at one version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub optional: bool,
    pub type_expr: TypeExpr,
}

impl Parameter {
    pub fn new(name: impl Into<String>, optional: bool, type_expr: impl Into<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            optional,
            type_expr: type_expr.into(),
        }
    }

    /// The persisted key of this parameter
    pub fn key(&self) -> ParameterKey {
        ParameterKey::Named {
            name: self.name.clone(),
            optional: self.optional,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key(), self.type_expr)
    }
}
