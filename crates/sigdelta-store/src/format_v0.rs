//! Delta file format v0
//!
//! One file per transition:
//!
//! ```yaml
//! schema_version: 0
//! from: "8.3"
//! to: "8.4"
//! added:
//!   array_find: {0: mixed, array: array, callback: callable}
//! changed:
//!   openssl_csr_sign:
//!     old: {0: "OpenSSLCertificate|false", csr: ..., serial=: int}
//!     new: {0: "OpenSSLCertificate|false", csr: ..., serial=: int, serial_hex=: "?string"}
//! removed: {}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sigdelta_core::model::deserialize_routine_map;
use sigdelta_core::{Delta, RoutineChange, Signature, Version, VersionTransition};

use crate::errors::{delta_validation, Result};

/// The only schema version this crate reads and writes
pub const SCHEMA_VERSION: u32 = 0;

/// Top-level delta file structure
///
/// A routine named twice within one partition fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaFileV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Older side of the transition
    pub from: Version,

    /// Newer side of the transition
    pub to: Version,

    /// Routines present only in `to`
    #[serde(default, deserialize_with = "deserialize_routine_map")]
    pub added: BTreeMap<String, Signature>,

    /// Routines present in both with different signatures
    #[serde(default, deserialize_with = "deserialize_routine_map")]
    pub changed: BTreeMap<String, ChangedEntry>,

    /// Routines present only in `from`
    #[serde(default, deserialize_with = "deserialize_routine_map")]
    pub removed: BTreeMap<String, Signature>,
}

/// Before/after pair of a changed routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangedEntry {
    pub old: Signature,
    pub new: Signature,
}

impl DeltaFileV0 {
    /// Lay a delta out in file form
    pub fn from_delta(transition: &VersionTransition, delta: &Delta) -> Self {
        let mut file = Self {
            schema_version: SCHEMA_VERSION,
            from: transition.from(),
            to: transition.to(),
            added: BTreeMap::new(),
            changed: BTreeMap::new(),
            removed: BTreeMap::new(),
        };

        for (routine, change) in delta.iter() {
            let routine = routine.to_string();
            match change {
                RoutineChange::Added(sig) => {
                    file.added.insert(routine, sig.clone());
                }
                RoutineChange::Changed { old, new } => {
                    file.changed.insert(
                        routine,
                        ChangedEntry {
                            old: old.clone(),
                            new: new.clone(),
                        },
                    );
                }
                RoutineChange::Removed(sig) => {
                    file.removed.insert(routine, sig.clone());
                }
            }
        }

        file
    }

    /// Validate the file and turn it into a chain link
    ///
    /// `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error if the schema version is not 0,
    /// `from` is not older than `to`, a routine appears in more than one
    /// partition, or a changed entry has identical sides.
    pub fn into_parts(self, path: &Path) -> Result<(VersionTransition, Delta)> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(delta_validation(
                path,
                &format!(
                    "Unsupported schema_version: {}. Expected {}",
                    self.schema_version, SCHEMA_VERSION
                ),
            ));
        }

        let transition = VersionTransition::new(self.from, self.to)
            .map_err(|e| delta_validation(path, &e.to_string()))?;

        let mut delta = Delta::new();
        let entries = self
            .added
            .into_iter()
            .map(|(name, sig)| (name, RoutineChange::Added(sig)))
            .chain(self.changed.into_iter().map(|(name, entry)| {
                (
                    name,
                    RoutineChange::Changed {
                        old: entry.old,
                        new: entry.new,
                    },
                )
            }))
            .chain(
                self.removed
                    .into_iter()
                    .map(|(name, sig)| (name, RoutineChange::Removed(sig))),
            );

        for (routine, change) in entries {
            if let RoutineChange::Changed { old, new } = &change {
                if old == new {
                    return Err(delta_validation(
                        path,
                        &format!("changed entry for {} has identical old and new", routine),
                    ));
                }
            }
            if let Some(previous) = delta.insert(routine.clone(), change) {
                return Err(delta_validation(
                    path,
                    &format!(
                        "routine {} appears in more than one partition (already {:?})",
                        routine,
                        previous.kind()
                    ),
                ));
            }
        }

        Ok((transition, delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<(VersionTransition, Delta)> {
        let file: DeltaFileV0 = serde_yaml::from_str(yaml).unwrap();
        file.into_parts(Path::new("test.yaml"))
    }

    #[test]
    fn test_parse_minimal_delta() {
        let (transition, delta) = parse(
            r#"
schema_version: 0
from: "8.3"
to: "8.4"
added:
  array_find: {0: mixed, array: array, callback: callable}
"#,
        )
        .unwrap();

        assert_eq!(transition.to_string(), "8.3 -> 8.4");
        assert_eq!(delta.len(), 1);
        let sig = delta.added().next().unwrap().1;
        assert_eq!(sig.params().len(), 2);
        assert_eq!(sig.params()[1].name, "callback");
    }

    #[test]
    fn test_reject_invalid_schema_version() {
        let err = parse("schema_version: 99\nfrom: \"8.3\"\nto: \"8.4\"\n").unwrap_err();
        assert!(err.to_string().contains("schema_version"));
    }

    #[test]
    fn test_reject_backward_transition() {
        assert!(parse("schema_version: 0\nfrom: \"8.4\"\nto: \"8.3\"\n").is_err());
    }

    #[test]
    fn test_reject_routine_in_two_partitions() {
        let err = parse(
            r#"
schema_version: 0
from: "8.3"
to: "8.4"
added:
  f: {0: int}
removed:
  f: {0: int}
"#,
        )
        .unwrap_err();
        assert!(err.message().contains("more than one partition"));
    }

    #[test]
    fn test_reject_routine_repeated_in_one_partition() {
        let result: std::result::Result<DeltaFileV0, _> = serde_yaml::from_str(
            r#"
schema_version: 0
from: "8.3"
to: "8.4"
removed:
  f: {0: int}
  f: {0: string}
"#,
        );
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("routine f appears more than once"));
    }

    #[test]
    fn test_reject_noop_change() {
        let err = parse(
            r#"
schema_version: 0
from: "8.3"
to: "8.4"
changed:
  f:
    old: {0: int}
    new: {0: int}
"#,
        )
        .unwrap_err();
        assert!(err.message().contains("identical"));
    }

    #[test]
    fn test_from_delta_partitions() {
        let transition = VersionTransition::new(Version::new(8, 3), Version::new(8, 4)).unwrap();
        let delta: Delta = vec![
            ("a", RoutineChange::Added(Signature::new("int"))),
            (
                "c",
                RoutineChange::Changed {
                    old: Signature::new("int"),
                    new: Signature::new("string"),
                },
            ),
            ("r", RoutineChange::Removed(Signature::new("void"))),
        ]
        .into_iter()
        .collect();

        let file = DeltaFileV0::from_delta(&transition, &delta);
        assert_eq!(file.schema_version, 0);
        assert_eq!(file.added.len(), 1);
        assert_eq!(file.changed.len(), 1);
        assert_eq!(file.removed.len(), 1);
        assert_eq!(file.into_parts(Path::new("x.json")).unwrap(), (transition, delta));
    }
}
