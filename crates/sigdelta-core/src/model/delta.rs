//! Delta between two adjacent versions' signature tables.
//!
//! A delta is one map from routine name to a tagged [`RoutineChange`], so a
//! routine can never sit in two partitions at once. The `added`, `changed`
//! and `removed` views are filters over that single map.

use std::collections::BTreeMap;

use crate::diff::engine::diff_signatures;
use crate::diff::model::ParamEdit;
use crate::model::signature::Signature;

/// What happened to one routine across a transition (older -> newer)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutineChange {
    /// Exists only on the newer side
    Added(Signature),
    /// Exists on both sides with different signatures
    Changed { old: Signature, new: Signature },
    /// Exists only on the older side
    Removed(Signature),
}

/// Partition tag of a [`RoutineChange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    Added,
    Changed,
    Removed,
}

impl RoutineChange {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Added(_) => ChangeKind::Added,
            Self::Changed { .. } => ChangeKind::Changed,
            Self::Removed(_) => ChangeKind::Removed,
        }
    }

    /// Signature this change asserts on the older side; `None` means absent
    pub fn older_side(&self) -> Option<&Signature> {
        match self {
            Self::Added(_) => None,
            Self::Changed { old, .. } => Some(old),
            Self::Removed(sig) => Some(sig),
        }
    }

    /// Signature this change asserts on the newer side; `None` means absent
    pub fn newer_side(&self) -> Option<&Signature> {
        match self {
            Self::Added(sig) => Some(sig),
            Self::Changed { new, .. } => Some(new),
            Self::Removed(_) => None,
        }
    }

    /// Parameter-level edits of a `Changed` entry; empty for other kinds
    pub fn edits(&self) -> Vec<ParamEdit> {
        match self {
            Self::Changed { old, new } => diff_signatures(old, new),
            Self::Added(_) | Self::Removed(_) => Vec::new(),
        }
    }
}

/// Per-partition entry counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeltaStats {
    pub added: usize,
    pub changed: usize,
    pub removed: usize,
}

/// Minimal structural difference between two adjacent versions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    entries: BTreeMap<String, RoutineChange>,
}

impl Delta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change for a routine, returning any change it replaces
    pub fn insert(&mut self, routine: impl Into<String>, change: RoutineChange) -> Option<RoutineChange> {
        self.entries.insert(routine.into(), change)
    }

    pub fn get(&self, routine: &str) -> Option<&RoutineChange> {
        self.entries.get(routine)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ordered by routine name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoutineChange)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn added(&self) -> impl Iterator<Item = (&str, &Signature)> {
        self.iter().filter_map(|(name, change)| match change {
            RoutineChange::Added(sig) => Some((name, sig)),
            _ => None,
        })
    }

    pub fn changed(&self) -> impl Iterator<Item = (&str, &Signature, &Signature)> {
        self.iter().filter_map(|(name, change)| match change {
            RoutineChange::Changed { old, new } => Some((name, old, new)),
            _ => None,
        })
    }

    pub fn removed(&self) -> impl Iterator<Item = (&str, &Signature)> {
        self.iter().filter_map(|(name, change)| match change {
            RoutineChange::Removed(sig) => Some((name, sig)),
            _ => None,
        })
    }

    pub fn stats(&self) -> DeltaStats {
        self.entries
            .values()
            .fold(DeltaStats::default(), |mut stats, change| {
                match change.kind() {
                    ChangeKind::Added => stats.added += 1,
                    ChangeKind::Changed => stats.changed += 1,
                    ChangeKind::Removed => stats.removed += 1,
                }
                stats
            })
    }
}

impl<K: Into<String>> FromIterator<(K, RoutineChange)> for Delta {
    fn from_iter<I: IntoIterator<Item = (K, RoutineChange)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
