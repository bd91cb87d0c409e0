//! Runtime versions and the transitions between them
//!
//! A [`Version`] is a discrete `major.minor` point. A [`VersionTransition`]
//! is an edge between two versions where `from < to`; adjacency is enforced
//! by the delta chain, not here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A `major.minor` runtime version (e.g. `8.3`)
///
/// Ordering is lexicographic on `(major, minor)`, so `8.10 > 8.9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u16,
    minor: u16,
}

impl Version {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u16 {
        self.major
    }

    pub fn minor(&self) -> u16 {
        self.minor
    }
}

/// A version string that is not of the form `<major>.<minor>`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version '{input}': expected <major>.<minor>")]
pub struct VersionParseError {
    pub input: String,
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VersionParseError {
            input: s.to_string(),
        };
        let (major, minor) = s.trim().split_once('.').ok_or_else(err)?;
        let major = major.parse::<u16>().map_err(|_| err())?;
        let minor = minor.parse::<u16>().map_err(|_| err())?;
        Ok(Self { major, minor })
    }
}

impl TryFrom<String> for Version {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A transition that does not move forward in version order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transition {from} -> {to} does not move forward")]
pub struct InvalidTransition {
    pub from: Version,
    pub to: Version,
}

/// An edge between two versions, older side first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VersionTransition {
    from: Version,
    to: Version,
}

impl VersionTransition {
    /// Create a transition from `from` to `to`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless `from < to`.
    pub fn new(from: Version, to: Version) -> Result<Self, InvalidTransition> {
        if from >= to {
            return Err(InvalidTransition { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> Version {
        self.from
    }

    pub fn to(&self) -> Version {
        self.to
    }
}

impl fmt::Display for VersionTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
